// ── Reactive state stream ──
//
// Subscription type for consuming catalog state changes.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::CatalogState;

/// A subscription to the catalog state.
///
/// Provides both point-in-time snapshot access and change notification via
/// [`changed`](Self::changed) or by converting to a `Stream`. Intermediate
/// states may be skipped; every observed value is a complete snapshot.
pub struct StateStream {
    current: CatalogState,
    receiver: watch::Receiver<CatalogState>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<CatalogState>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or by the last `changed()`.
    pub fn current(&self) -> &CatalogState {
        &self.current
    }

    /// The latest snapshot (may have changed since `current`).
    pub fn latest(&self) -> CatalogState {
        self.receiver.borrow().clone()
    }

    /// `true` if a change was published since the last `changed()`.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the catalog has been dropped.
    pub async fn changed(&mut self) -> Option<CatalogState> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream`, starting with the current snapshot.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StateWatchStream {
    inner: WatchStream<CatalogState>,
}

impl Stream for StateWatchStream {
    type Item = CatalogState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
