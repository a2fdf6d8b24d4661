// ── Catalog synchronization core ──
//
// Owns the catalog state and sequences every fetch and favourite mutation
// against the remote gateways. Surfaces either await the intent methods
// directly or hand an `Intent` to `dispatch`.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::favorites::{self, ToggleOutcome};
use crate::gateway::{CatalogGateway, FavoritesGateway};
use crate::intent::Intent;
use crate::model::{Category, LoadState, Product, ProductId, UserId};
use crate::selection;
use crate::session::Session;
use crate::store::{CatalogState, CatalogStore};
use crate::stream::StateStream;
use crate::view::{self, CatalogView, ProductDetail};

// ── Catalog ──────────────────────────────────────────────────────────

/// The main entry point for view surfaces.
///
/// Cheaply cloneable via `Arc<CatalogInner>`. Created once per session;
/// an anonymous session keeps favourites disabled.
pub struct Catalog<C, F> {
    inner: Arc<CatalogInner<C, F>>,
}

struct CatalogInner<C, F> {
    config: CatalogConfig,
    catalog: C,
    favorites: F,
    store: CatalogStore,
    tasks: TaskTracker,
}

impl<C, F> Clone for Catalog<C, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, F> Catalog<C, F>
where
    C: CatalogGateway,
    F: FavoritesGateway,
{
    /// Create a catalog for `session`. Nothing is fetched until
    /// [`start()`](Self::start) or an intent runs.
    pub fn new(config: CatalogConfig, session: &Session, catalog: C, favorites: F) -> Self {
        let store = CatalogStore::new(CatalogState::for_user(session.user_id().cloned()));
        Self {
            inner: Arc::new(CatalogInner {
                config,
                catalog,
                favorites,
                store,
                tasks: TaskTracker::new(),
            }),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Initial population: categories (and the products of the resolved
    /// selection) alongside the user's favourite ids.
    pub async fn start(&self) -> Result<(), CoreError> {
        info!(
            user_id = ?self.inner.store.read(|s| s.user_id.clone()),
            "starting catalog"
        );
        let (catalog, favorites) = tokio::join!(self.load_categories(), self.load_favorites());
        catalog.and(favorites)
    }

    /// Run `intent` on a tracked background task.
    ///
    /// Returns `false` once [`shutdown()`](Self::shutdown) has begun.
    pub fn dispatch(&self, intent: Intent) -> bool {
        if self.inner.tasks.is_closed() {
            debug!(?intent, "catalog shut down; intent dropped");
            return false;
        }
        let this = self.clone();
        self.inner.tasks.spawn(async move {
            this.run(intent).await;
        });
        true
    }

    /// Stop accepting dispatched intents and wait for in-flight ones.
    /// Network calls already started run to completion.
    pub async fn shutdown(&self) {
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        debug!("catalog shut down");
    }

    /// Switch identity. A different user clears the favourite state and
    /// reloads it; results still in flight for the previous user are
    /// dropped. The favourites gateway must already act for the new user.
    pub async fn replace_session(&self, session: &Session) -> Result<(), CoreError> {
        let user = session.user_id().cloned();
        let changed = self.inner.store.modify(|s| {
            if s.user_id == user {
                return false;
            }
            s.user_id = user.clone();
            s.session_epoch += 1;
            s.favorite_ids = Arc::default();
            s.favorite_products = Arc::default();
            s.favorites_status = LoadState::Idle;
            true
        });
        if !changed {
            return Ok(());
        }
        info!(user_id = ?user, "session replaced");
        self.load_favorites().await
    }

    async fn run(&self, intent: Intent) {
        let result = match intent {
            Intent::SetPendingCategoryTitle(title) => self.set_pending_category_title(title).await,
            Intent::SelectCategory(index) => self.select_category(index).await,
            Intent::ToggleFavorite(product_id) => {
                self.toggle_favorite(&product_id).await;
                Ok(())
            }
            Intent::LoadFavorites => self.load_favorites().await,
            Intent::LoadFavoriteProducts => self.load_favorite_products().await,
            Intent::LoadAllProductsIfNeeded => self.load_all_products_if_needed().await,
            Intent::Retry => self.retry().await,
        };
        // Failures are already published as load state.
        if let Err(e) = result {
            debug!(error = %e, "background intent failed");
        }
        let (catalog, favorites) = self
            .inner
            .store
            .read(|s| (s.catalog_status.name(), s.favorites_status.name()));
        debug!(catalog, favorites, "intent finished");
    }

    // ── Catalog loading ──────────────────────────────────────────────

    /// Fetch categories, resolve the initial selection and load its
    /// products.
    pub async fn load_categories(&self) -> Result<(), CoreError> {
        let store = &self.inner.store;
        store.modify(CatalogState::begin_catalog_load);

        let fetched = match self.inner.catalog.fetch_categories().await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(error = %e, "category load failed");
                store.modify(|s| s.end_catalog_load(Some(&e)));
                return Err(e);
            }
        };

        let config = &self.inner.config;
        let index = store.modify(|s| {
            let mut categories = Vec::with_capacity(fetched.len() + 1);
            categories.push(Category::all(config.all_category_title.clone()));
            categories.extend(fetched);

            let index = selection::resolve_initial_index(
                &categories,
                s.selection.pending_category_title.as_deref(),
                config.fallback_category_title.as_deref(),
            );
            s.categories = Arc::new(categories);
            s.selection.pending_category_title = None;
            s.selection.selected_index = index;
            s.release_catalog_load();
            index
        });
        debug!(
            count = store.read(|s| s.categories.len()),
            index, "categories loaded"
        );

        self.load_products_for_category(index).await
    }

    /// Select `index` and fetch its products ("All" or an unknown index
    /// fetches the whole catalog).
    ///
    /// The result is dropped if the selection moved on while it was in
    /// flight.
    pub async fn load_products_for_category(&self, index: usize) -> Result<(), CoreError> {
        let store = &self.inner.store;
        let all_title = &self.inner.config.all_category_title;
        let category = store.modify(|s| {
            s.selection.selected_index = index;
            s.begin_catalog_load();
            s.categories.get(index).cloned()
        });
        let filter = category.filter(|c| !c.is_all(all_title)).map(|c| c.id);
        debug!(index, category_id = ?filter, "loading products");

        let result = self.inner.catalog.fetch_products(filter.as_ref()).await;

        store.modify(|s| {
            if s.selection.selected_index != index {
                debug!(
                    index,
                    selected = s.selection.selected_index,
                    "discarding superseded product load"
                );
                s.abandon_catalog_load();
                return Ok(());
            }
            match result {
                Ok(products) => {
                    debug!(index, count = products.len(), "products loaded");
                    s.products = Arc::new(products);
                    s.end_catalog_load(None);
                    Ok(())
                }
                Err(e) => {
                    warn!(index, error = %e, "product load failed");
                    s.end_catalog_load(Some(&e));
                    Err(e)
                }
            }
        })
    }

    /// Make `index` the active category. Re-selecting the active category
    /// with products already loaded does nothing.
    pub async fn select_category(&self, index: usize) -> Result<(), CoreError> {
        let proceed = self.inner.store.modify(|s| {
            if s.selection.selected_index == index && !s.products.is_empty() {
                return false;
            }
            s.selection.selected_index = index;
            true
        });
        if !proceed {
            debug!(index, "category already selected");
            return Ok(());
        }
        self.load_products_for_category(index).await
    }

    /// Request a category by title. Applied immediately when categories
    /// are loaded, otherwise on the next category load.
    pub async fn set_pending_category_title(
        &self,
        title: impl Into<String>,
    ) -> Result<(), CoreError> {
        let title = title.into();
        let resolved = self.inner.store.modify(|s| {
            if s.categories.is_empty() {
                s.selection.pending_category_title = Some(title.clone());
                return None;
            }
            s.selection.pending_category_title = None;
            Some(selection::resolve_requested_index(&s.categories, &title))
        });
        match resolved {
            Some(index) => {
                debug!(%title, index, "pending category resolved");
                self.select_category(index).await
            }
            None => {
                debug!(%title, "category title deferred until categories load");
                Ok(())
            }
        }
    }

    /// Re-run whichever load has no data: categories if none are loaded,
    /// otherwise products of the current selection.
    pub async fn retry(&self) -> Result<(), CoreError> {
        let (has_categories, index) = self
            .inner
            .store
            .read(|s| (!s.categories.is_empty(), s.selection.selected_index));
        if has_categories {
            self.load_products_for_category(index).await
        } else {
            self.load_categories().await
        }
    }

    /// Fill an empty product list with the whole catalog.
    pub async fn load_all_products_if_needed(&self) -> Result<(), CoreError> {
        let store = &self.inner.store;
        let needed = store.modify(|s| {
            if !s.products.is_empty() {
                return false;
            }
            s.begin_catalog_load();
            true
        });
        if !needed {
            return Ok(());
        }

        match self.inner.catalog.fetch_products(None).await {
            Ok(products) => {
                store.modify(|s| {
                    if s.products.is_empty() {
                        s.products = Arc::new(products);
                    }
                    s.end_catalog_load(None);
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "catalog-wide product load failed");
                store.modify(|s| s.end_catalog_load(Some(&e)));
                Err(e)
            }
        }
    }

    // ── Favourites ───────────────────────────────────────────────────

    fn current_user(&self) -> Option<(UserId, u64)> {
        self.inner
            .store
            .read(|s| s.user_id.clone().map(|user| (user, s.session_epoch)))
    }

    /// Store `ids` as the favourite set unless the identity changed.
    fn publish_favorite_ids(&self, epoch: u64, ids: Vec<ProductId>) -> Option<BTreeSet<ProductId>> {
        let ids: BTreeSet<ProductId> = ids.into_iter().collect();
        self.inner.store.modify(|s| {
            if s.session_epoch != epoch {
                return None;
            }
            s.favorite_ids = Arc::new(ids.clone());
            Some(ids)
        })
    }

    fn fail_favorites(&self, epoch: u64, error: &CoreError) {
        warn!(error = %error, "favourites load failed");
        self.inner.store.modify(|s| {
            if s.session_epoch == epoch {
                s.favorites_status = LoadState::Error(error.user_message());
            }
        });
    }

    /// Fetch the session user's favourite ids. A no-op without a user.
    pub async fn load_favorites(&self) -> Result<(), CoreError> {
        let Some((user, epoch)) = self.current_user() else {
            debug!("anonymous session; favourites disabled");
            return Ok(());
        };
        self.inner
            .store
            .modify(|s| s.favorites_status = LoadState::Loading);

        match self.inner.favorites.fetch_favorite_ids(&user).await {
            Ok(ids) => {
                debug!(count = ids.len(), "favourite ids loaded");
                if self.publish_favorite_ids(epoch, ids).is_some() {
                    self.inner
                        .store
                        .modify(|s| s.favorites_status = LoadState::Idle);
                }
                Ok(())
            }
            Err(e) => {
                self.fail_favorites(epoch, &e);
                Err(e)
            }
        }
    }

    /// Refresh favourite ids, then fetch the full records for exactly
    /// those ids in one request. An empty set skips the second request.
    pub async fn load_favorite_products(&self) -> Result<(), CoreError> {
        let Some((user, epoch)) = self.current_user() else {
            warn!("favourite products requested without a signed-in user");
            return Ok(());
        };
        let store = &self.inner.store;
        store.modify(|s| s.favorites_status = LoadState::Loading);

        let ids = match self.inner.favorites.fetch_favorite_ids(&user).await {
            Ok(ids) => ids,
            Err(e) => {
                self.fail_favorites(epoch, &e);
                return Err(e);
            }
        };
        let Some(ids) = self.publish_favorite_ids(epoch, ids) else {
            return Ok(());
        };

        let products = if ids.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<ProductId> = ids.into_iter().collect();
            match self.inner.catalog.fetch_products_by_ids(&ids).await {
                Ok(products) => products,
                Err(e) => {
                    self.fail_favorites(epoch, &e);
                    return Err(e);
                }
            }
        };
        debug!(count = products.len(), "favourite products loaded");

        store.modify(|s| {
            if s.session_epoch == epoch {
                s.favorite_products = Arc::new(products);
                s.favorites_status = LoadState::Idle;
            }
        });
        Ok(())
    }

    /// Flip `product_id` in the favourite set, optimistically.
    ///
    /// Observers see the new membership immediately; if the backend
    /// rejects the change it is rolled back exactly.
    pub async fn toggle_favorite(&self, product_id: &ProductId) -> ToggleOutcome {
        let prepared = self.inner.store.modify(|s| {
            let user = s.user_id.clone()?;
            let epoch = s.session_epoch;
            Some((user, epoch, favorites::apply_local(s, product_id)))
        });
        let Some((user, epoch, token)) = prepared else {
            warn!(%product_id, "favourite toggle ignored: no signed-in user");
            return ToggleOutcome::Ignored;
        };
        debug!(%product_id, now_favorite = token.now_favorite(), "favourite toggled locally");

        let gateway = &self.inner.favorites;
        let result = if token.was_favorite() {
            gateway.remove_favorite(&user, product_id).await
        } else {
            gateway.add_favorite(&user, product_id).await
        };

        self.inner.store.modify(|s| {
            if s.session_epoch != epoch {
                debug!(%product_id, "session changed; toggle result discarded");
                return ToggleOutcome::Discarded;
            }
            favorites::commit_or_revert(s, token, result)
        })
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Current state as one consistent snapshot.
    pub fn snapshot(&self) -> CatalogState {
        self.inner.store.snapshot()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream {
        self.inner.store.subscribe()
    }

    pub fn categories(&self) -> Arc<Vec<Category>> {
        self.inner.store.read(|s| Arc::clone(&s.categories))
    }

    pub fn selected_index(&self) -> usize {
        self.inner.store.read(CatalogState::selected_index)
    }

    pub fn products(&self) -> Arc<Vec<Product>> {
        self.inner.store.read(|s| Arc::clone(&s.products))
    }

    pub fn favorite_ids(&self) -> Arc<BTreeSet<ProductId>> {
        self.inner.store.read(|s| Arc::clone(&s.favorite_ids))
    }

    pub fn favorite_products(&self) -> Arc<Vec<Product>> {
        self.inner.store.read(|s| Arc::clone(&s.favorite_products))
    }

    pub fn catalog_status(&self) -> LoadState {
        self.inner.store.read(|s| s.catalog_status.clone())
    }

    pub fn favorites_status(&self) -> LoadState {
        self.inner.store.read(|s| s.favorites_status.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.inner.store.read(CatalogState::is_loading)
    }

    /// Message of the last failed catalog load, if it has not recovered.
    pub fn error(&self) -> Option<String> {
        self.inner
            .store
            .read(|s| s.catalog_status.error().map(str::to_owned))
    }

    /// Project the current state into view models.
    pub fn view(&self) -> CatalogView {
        self.inner
            .store
            .read(|s| CatalogView::project(s, &self.inner.config))
    }

    pub fn product_detail(&self, product_id: &ProductId) -> Option<ProductDetail> {
        self.inner.store.read(|s| {
            view::product_detail(
                product_id,
                &s.products,
                &s.favorite_products,
                &s.favorite_ids,
                &self.inner.config,
            )
        })
    }
}
