// ── Reactive catalog store ──
//
// One `watch` channel holds the whole `CatalogState`. Writers mutate it in
// place under the channel's lock and every subscriber observes a single
// consistent snapshot of all fields.

mod catalog_store;
mod state;

pub use catalog_store::CatalogStore;
pub use state::{CatalogState, SelectionState};
