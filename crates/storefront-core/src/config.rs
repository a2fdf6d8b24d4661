// ── Catalog behaviour configuration ──
//
// Tuning knobs for the synchronization core and the view projections.
// The CLI builds a `CatalogConfig` from the config file and hands it in;
// core never reads config files.

/// Configuration for one [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Title given to the synthetic catalog-wide category.
    pub all_category_title: String,
    /// Category selected on first load when no title was requested.
    /// `None` disables the fallback and selects "All".
    pub fallback_category_title: Option<String>,
    /// Prefix used when formatting prices.
    pub currency_symbol: String,
    /// Storage bucket holding product images.
    pub image_bucket: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            all_category_title: "All".into(),
            fallback_category_title: Some("Outdoor".into()),
            currency_symbol: "₽".into(),
            image_bucket: "products".into(),
        }
    }
}
