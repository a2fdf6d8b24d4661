use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

use super::state::CatalogState;
use crate::stream::StateStream;

/// Owner of the `watch` channel carrying [`CatalogState`].
pub struct CatalogStore {
    state: watch::Sender<CatalogState>,
    /// Serializes `modify` calls so each edits the latest state.
    writer: Mutex<()>,
}

impl CatalogStore {
    pub fn new(initial: CatalogState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            writer: Mutex::new(()),
        }
    }

    /// Clone of the current state. Collections are shared, not copied.
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Read a projection of the current state without cloning all of it.
    pub fn read<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    /// Mutate the state atomically and return what `f` returns.
    ///
    /// `f` edits a private copy which is published only if it differs
    /// from the current state. Writers are serialized; `f` must not call
    /// `modify` again.
    pub(crate) fn modify<R>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = self.state.borrow().clone();
        let out = f(&mut next);
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{LoadState, ProductId};

    #[tokio::test]
    async fn unchanged_state_does_not_notify() {
        let store = CatalogStore::new(CatalogState::default());
        let mut stream = store.subscribe();

        store.modify(|s| s.catalog_status = LoadState::Idle);
        assert!(!stream.has_changed());

        store.modify(|s| {
            Arc::make_mut(&mut s.favorite_ids).insert(ProductId::from("p1"));
        });
        assert!(stream.has_changed());
        let snap = stream.changed().await.unwrap();
        assert!(snap.is_favorite(&ProductId::from("p1")));
    }

    #[test]
    fn modify_returns_closure_value() {
        let store = CatalogStore::new(CatalogState::default());
        let index = store.modify(|s| {
            s.selection.selected_index = 3;
            s.selection.selected_index
        });
        assert_eq!(index, 3);
        assert_eq!(store.read(CatalogState::selected_index), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_do_not_lose_updates() {
        let store = Arc::new(CatalogStore::new(CatalogState::default()));
        let writers: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    for i in 0..50 {
                        store.modify(|s| {
                            Arc::make_mut(&mut s.favorite_ids)
                                .insert(ProductId::from(format!("p{n}-{i}")));
                        });
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap();
        }
        assert_eq!(store.read(|s| s.favorite_ids.len()), 400);
    }
}
