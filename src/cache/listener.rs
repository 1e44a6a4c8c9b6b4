use tracing::warn;

use crate::storage::ChangeSubscription;

/// Turns catalog change notifications into cache invalidations.
///
/// The listener is polled by the store before every lookup rather than
/// acting on delivery, so a cache is never rebuilt while a caller still
/// iterates the previous generation.
#[derive(Debug)]
pub struct InvalidationListener {
    subscription: ChangeSubscription,
    disconnected: bool,
}

impl InvalidationListener {
    /// Wraps a catalog subscription.
    #[must_use]
    pub fn new(subscription: ChangeSubscription) -> Self {
        Self {
            subscription,
            disconnected: false,
        }
    }

    /// Consumes queued notifications and reports whether the cache is stale.
    ///
    /// Once the catalog side disconnects, changes can no longer be observed,
    /// so every later call reports the cache stale.
    pub fn accept_pending(&mut self) -> bool {
        let drained = self.subscription.drain();
        if drained.disconnected && !self.disconnected {
            warn!(
                "trigger catalog change channel disconnected; \
                 event trigger cache rebuilds on every lookup"
            );
            self.disconnected = true;
        }
        drained.received > 0 || self.disconnected
    }

    /// Whether the catalog side of the subscription is gone.
    #[must_use]
    pub const fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CatalogChange, ChangeNotifier};

    #[test]
    fn test_accept_pending_reports_changes_once() {
        let notifier = ChangeNotifier::new(8);
        let mut listener = InvalidationListener::new(notifier.subscribe());

        assert!(!listener.accept_pending());

        notifier.notify(&CatalogChange::Dropped {
            name: "t".to_string(),
        });
        notifier.notify(&CatalogChange::Created {
            name: "u".to_string(),
        });

        assert!(listener.accept_pending());
        assert!(!listener.accept_pending());
    }

    #[test]
    fn test_disconnected_listener_is_always_stale() {
        let notifier = ChangeNotifier::new(8);
        let mut listener = InvalidationListener::new(notifier.subscribe());
        drop(notifier);

        assert!(listener.accept_pending());
        assert!(listener.is_disconnected());
        assert!(listener.accept_pending());
    }
}
