use crate::model::ProductId;

/// A request from a view surface, run in the background by
/// [`Catalog::dispatch`](crate::Catalog::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetPendingCategoryTitle(String),
    SelectCategory(usize),
    ToggleFavorite(ProductId),
    LoadFavorites,
    LoadFavoriteProducts,
    LoadAllProductsIfNeeded,
    Retry,
}
