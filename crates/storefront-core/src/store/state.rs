use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::CoreError;
use crate::model::{Category, LoadState, Product, ProductId, UserId};

/// Which category is active, plus a title requested before categories
/// finished loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_index: usize,
    /// Consumed (reset to `None`) the first time it resolves.
    pub pending_category_title: Option<String>,
}

/// Everything the core publishes, as one value.
///
/// Collections sit behind `Arc` so snapshots are cheap to clone; writers
/// go through `Arc::make_mut`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Fetched categories with the synthetic "All" entry at index 0.
    /// Empty until the first successful category load.
    pub categories: Arc<Vec<Category>>,
    pub selection: SelectionState,
    /// Products of the selected category.
    pub products: Arc<Vec<Product>>,
    /// Favourite product ids of `user_id`.
    pub favorite_ids: Arc<BTreeSet<ProductId>>,
    /// Full records for (a subset of) `favorite_ids`.
    pub favorite_products: Arc<Vec<Product>>,
    /// Category + product pipeline.
    pub catalog_status: LoadState,
    /// Favourites pipeline.
    pub favorites_status: LoadState,
    /// The signed-in user; `None` disables favourites.
    pub user_id: Option<UserId>,
    /// Bumped on every identity change so late favourite results for a
    /// previous user are dropped.
    pub(crate) session_epoch: u64,
    /// Category and product fetches in flight.
    pub(crate) catalog_loads: u32,
}

impl CatalogState {
    pub(crate) fn for_user(user_id: Option<UserId>) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selection.selected_index
    }

    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorite_ids.contains(product_id)
    }

    /// Look a product up in the catalog page first, then among favourites.
    pub fn find_product(&self, product_id: &ProductId) -> Option<&Product> {
        self.products
            .iter()
            .chain(self.favorite_products.iter())
            .find(|p| &p.id == product_id)
    }

    pub(crate) fn begin_catalog_load(&mut self) {
        self.catalog_loads += 1;
        self.catalog_status = LoadState::Loading;
    }

    /// Settle a fetch that published its result. A failure shows at once;
    /// success goes idle only when no other fetch is in flight.
    pub(crate) fn end_catalog_load(&mut self, error: Option<&CoreError>) {
        self.release_catalog_load();
        match error {
            Some(e) => self.catalog_status = LoadState::Error(e.user_message()),
            None if self.catalog_loads == 0 => self.catalog_status = LoadState::Idle,
            None => {}
        }
    }

    /// Settle a fetch whose result was dropped.
    pub(crate) fn abandon_catalog_load(&mut self) {
        self.release_catalog_load();
        if self.catalog_loads == 0 && self.catalog_status.is_loading() {
            self.catalog_status = LoadState::Idle;
        }
    }

    /// Drop the count without touching the status; the caller starts the
    /// follow-up fetch.
    pub(crate) fn release_catalog_load(&mut self) {
        self.catalog_loads = self.catalog_loads.saturating_sub(1);
    }

    /// `true` while either pipeline is loading.
    pub fn is_loading(&self) -> bool {
        self.catalog_status.is_loading() || self.favorites_status.is_loading()
    }
}
