//! Catalog change notification channel.
//!
//! Backends broadcast [`CatalogChange`]s through a [`ChangeNotifier`]; each
//! listener owns a [`ChangeSubscription`] backed by a bounded channel.
//! Notifications never block the writer: a full channel already holds a
//! pending change, which is all a listener needs to know.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use tracing::warn;

use super::traits::CatalogChange;

/// Default per-subscription channel capacity.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 256;

/// Fan-out of catalog changes to subscriptions.
#[derive(Debug)]
pub struct ChangeNotifier {
    capacity: usize,
    subscribers: Mutex<Vec<Sender<CatalogChange>>>,
}

impl ChangeNotifier {
    /// Creates a notifier whose subscriptions buffer up to `capacity` changes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Opens a new subscription.
    #[must_use]
    pub fn subscribe(&self) -> ChangeSubscription {
        let (tx, rx) = bounded(self.capacity);
        self.lock_subscribers().push(tx);
        ChangeSubscription { rx }
    }

    /// Broadcasts a change, pruning subscriptions whose receiver is gone.
    ///
    /// Never fails: the change has already been committed by the caller, and
    /// every live subscriber must hear about it.
    pub fn notify(&self, change: &CatalogChange) {
        self.lock_subscribers()
            .retain(|tx| match tx.try_send(change.clone()) {
                Ok(()) | Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            });
    }

    /// Number of live subscriptions as of the last broadcast.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    // Every critical section is a single push or retain, so a poisoned list
    // is still well formed.
    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<Sender<CatalogChange>>> {
        self.subscribers.lock().unwrap_or_else(|poisoned| {
            warn!("catalog notifier lock poisoned; recovering subscriber list");
            PoisonError::into_inner(poisoned)
        })
    }

    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = self.subscribers.lock();
                    panic!("poisoning notifier lock");
                })
                .join()
        });
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_CAPACITY)
    }
}

/// Outcome of draining a subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Drained {
    /// Number of changes received.
    pub received: usize,
    /// Whether the catalog side of the channel is gone.
    pub disconnected: bool,
}

/// Receiving end of a catalog change subscription.
///
/// Dropping it unsubscribes; the notifier prunes it on the next broadcast.
#[derive(Debug)]
pub struct ChangeSubscription {
    rx: Receiver<CatalogChange>,
}

impl ChangeSubscription {
    /// Receives every queued change without blocking.
    pub fn drain(&self) -> Drained {
        let mut out = Drained::default();
        loop {
            match self.rx.try_recv() {
                Ok(_) => out.received += 1,
                Err(TryRecvError::Empty) => return out,
                Err(TryRecvError::Disconnected) => {
                    out.disconnected = true;
                    return out;
                }
            }
        }
    }

    /// Receives the next queued change, if any.
    #[must_use]
    pub fn try_next(&self) -> Option<CatalogChange> {
        self.rx.try_recv().ok()
    }
}
