// ── Optimistic favourite mutation ──
//
// A toggle is applied to the state before the remote call is made and
// undone exactly if the call fails. Both halves are pure functions over
// `CatalogState`; `Catalog::toggle_favorite` runs them under the store
// lock around the network call.

use std::sync::Arc;

use tracing::warn;

use crate::error::CoreError;
use crate::model::{Product, ProductId};
use crate::store::CatalogState;

/// What it takes to undo one optimistic toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoToken {
    product_id: ProductId,
    was_favorite: bool,
    /// Entry taken out of `favorite_products`, with its position.
    removed: Option<(usize, Product)>,
    /// Whether the toggle appended an entry to `favorite_products`.
    appended: bool,
}

impl UndoToken {
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn was_favorite(&self) -> bool {
        self.was_favorite
    }

    pub fn now_favorite(&self) -> bool {
        !self.was_favorite
    }
}

/// Result of a favourite toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No signed-in user; nothing changed.
    Ignored,
    /// The backend accepted the change.
    Committed { now_favorite: bool },
    /// The backend call failed and the local change was rolled back.
    Reverted { error: CoreError },
    /// The identity changed while the call was in flight; the result no
    /// longer applies to the published state.
    Discarded,
}

/// Flip membership of `product_id` and patch `favorite_products` to match.
pub fn apply_local(state: &mut CatalogState, product_id: &ProductId) -> UndoToken {
    let was_favorite = state.favorite_ids.contains(product_id);
    let mut removed = None;
    let mut appended = false;

    if was_favorite {
        Arc::make_mut(&mut state.favorite_ids).remove(product_id);
        if let Some(pos) = state.favorite_products.iter().position(|p| &p.id == product_id) {
            let product = Arc::make_mut(&mut state.favorite_products).remove(pos);
            removed = Some((pos, product));
        }
    } else {
        Arc::make_mut(&mut state.favorite_ids).insert(product_id.clone());
        let already_listed = state.favorite_products.iter().any(|p| &p.id == product_id);
        if !already_listed {
            if let Some(product) = state.products.iter().find(|p| &p.id == product_id).cloned() {
                Arc::make_mut(&mut state.favorite_products).push(product);
                appended = true;
            }
        }
    }

    UndoToken {
        product_id: product_id.clone(),
        was_favorite,
        removed,
        appended,
    }
}

/// Undo exactly what `apply_local` did for `token`.
pub fn revert(state: &mut CatalogState, token: UndoToken) {
    let UndoToken {
        product_id,
        was_favorite,
        removed,
        appended,
    } = token;

    if was_favorite {
        Arc::make_mut(&mut state.favorite_ids).insert(product_id.clone());
    } else {
        Arc::make_mut(&mut state.favorite_ids).remove(&product_id);
    }

    if let Some((pos, product)) = removed {
        if !state.favorite_products.iter().any(|p| p.id == product_id) {
            let products = Arc::make_mut(&mut state.favorite_products);
            let pos = pos.min(products.len());
            products.insert(pos, product);
        }
    }
    if appended {
        if let Some(pos) = state.favorite_products.iter().position(|p| p.id == product_id) {
            Arc::make_mut(&mut state.favorite_products).remove(pos);
        }
    }
}

/// Keep the optimistic change on success, roll it back on failure.
pub fn commit_or_revert(
    state: &mut CatalogState,
    token: UndoToken,
    result: Result<(), CoreError>,
) -> ToggleOutcome {
    match result {
        Ok(()) => ToggleOutcome::Committed {
            now_favorite: token.now_favorite(),
        },
        Err(error) => {
            warn!(
                product_id = %token.product_id,
                was_favorite = token.was_favorite,
                error = %error,
                "favourite toggle failed; rolling back"
            );
            revert(state, token);
            ToggleOutcome::Reverted { error }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::CategoryId;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::from(id),
            title: format!("Product {id}"),
            cost: 100,
            category_id: CategoryId::from("c1"),
            is_best_seller: false,
            description: String::new(),
        }
    }

    fn state(favorites: &[&str], page: &[&str], fav_products: &[&str]) -> CatalogState {
        CatalogState {
            favorite_ids: Arc::new(favorites.iter().map(|id| ProductId::from(*id)).collect()),
            products: Arc::new(page.iter().map(|id| product(id)).collect()),
            favorite_products: Arc::new(fav_products.iter().map(|id| product(id)).collect()),
            ..CatalogState::default()
        }
    }

    fn ids(state: &CatalogState) -> Vec<&str> {
        state.favorite_ids.iter().map(ProductId::as_str).collect()
    }

    #[test]
    fn add_appends_product_from_catalog_page() {
        let mut s = state(&[], &["p1", "p2"], &[]);
        let token = apply_local(&mut s, &ProductId::from("p1"));
        assert!(!token.was_favorite());
        assert_eq!(ids(&s), vec!["p1"]);
        assert_eq!(s.favorite_products.len(), 1);
        assert_eq!(s.favorite_products[0].id.as_str(), "p1");
    }

    #[test]
    fn add_of_unknown_product_only_touches_ids() {
        let mut s = state(&[], &["p1"], &[]);
        apply_local(&mut s, &ProductId::from("p9"));
        assert_eq!(ids(&s), vec!["p9"]);
        assert!(s.favorite_products.is_empty());
    }

    #[test]
    fn failed_remove_restores_original_position() {
        let mut s = state(&["p1", "p2", "p3"], &[], &["p1", "p2", "p3"]);
        let before = s.clone();

        let token = apply_local(&mut s, &ProductId::from("p2"));
        assert_eq!(ids(&s), vec!["p1", "p3"]);
        assert_eq!(s.favorite_products.len(), 2);

        let outcome = commit_or_revert(
            &mut s,
            token,
            Err(CoreError::Http {
                status: 500,
                message: "boom".into(),
            }),
        );
        assert!(matches!(outcome, ToggleOutcome::Reverted { .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn failed_add_removes_appended_entry() {
        let mut s = state(&["p1"], &["p1", "p2"], &["p1"]);
        let before = s.clone();
        let token = apply_local(&mut s, &ProductId::from("p2"));
        commit_or_revert(&mut s, token, Err(CoreError::Timeout));
        assert_eq!(s, before);
    }

    #[test]
    fn success_keeps_optimistic_state() {
        let mut s = state(&[], &["p1"], &[]);
        let token = apply_local(&mut s, &ProductId::from("p1"));
        let outcome = commit_or_revert(&mut s, token, Ok(()));
        assert_eq!(outcome, ToggleOutcome::Committed { now_favorite: true });
        assert_eq!(ids(&s), vec!["p1"]);
    }

    #[test]
    fn even_number_of_toggles_returns_to_start() {
        for initial in [BTreeSet::new(), BTreeSet::from([ProductId::from("p1")])] {
            for n in 1..=5 {
                let mut s = CatalogState {
                    favorite_ids: Arc::new(initial.clone()),
                    ..CatalogState::default()
                };
                for _ in 0..n {
                    let token = apply_local(&mut s, &ProductId::from("p1"));
                    commit_or_revert(&mut s, token, Ok(()));
                }
                let started = initial.contains(&ProductId::from("p1"));
                assert_eq!(s.is_favorite(&ProductId::from("p1")), started ^ (n % 2 == 1));
            }
        }
    }

    #[test]
    fn revert_position_is_clamped() {
        let mut s = state(&["p1", "p2"], &[], &["p1", "p2"]);
        let token = apply_local(&mut s, &ProductId::from("p2"));
        // p1 removed by a concurrent toggle before the failure lands.
        let other = apply_local(&mut s, &ProductId::from("p1"));
        commit_or_revert(&mut s, other, Ok(()));
        revert(&mut s, token);
        assert_eq!(ids(&s), vec!["p2"]);
        assert_eq!(s.favorite_products.len(), 1);
        assert_eq!(s.favorite_products[0].id.as_str(), "p2");
    }
}
