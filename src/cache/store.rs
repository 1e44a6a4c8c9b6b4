use std::sync::Arc;

use tracing::debug;

use crate::error::KyroResult;
use crate::event::SessionMode;
use crate::storage::TriggerCatalog;

use super::builder::build;
use super::listener::InvalidationListener;
use super::TriggerCache;

/// Session-owned holder of the current cache generation.
///
/// Rebuilds are lazy: an invalidation only clears the validity flag, and the
/// next [`CacheStore::get`] rebuilds from a fresh catalog scan. A new
/// generation is fully built before it replaces the previous one, and callers
/// holding the previous `Arc` keep a consistent view until they drop it.
#[derive(Debug)]
pub struct CacheStore {
    current: Option<Arc<TriggerCache>>,
    valid: bool,
    generation: u64,
    rebuilds: u64,
    listener: InvalidationListener,
}

impl CacheStore {
    /// Creates an empty, invalid store fed by `listener`.
    #[must_use]
    pub fn new(listener: InvalidationListener) -> Self {
        Self {
            current: None,
            valid: false,
            generation: 0,
            rebuilds: 0,
            listener,
        }
    }

    /// Returns the current cache, rebuilding it first if it is stale.
    ///
    /// A cache built for another session mode counts as stale.
    ///
    /// # Errors
    ///
    /// Propagates catalog scan failures and builder invariant violations. On
    /// failure the store stays invalid and keeps the previous generation.
    pub fn get(
        &mut self,
        catalog: &dyn TriggerCatalog,
        mode: SessionMode,
    ) -> KyroResult<Arc<TriggerCache>> {
        if self.listener.accept_pending() {
            self.invalidate();
        }

        if self.valid {
            if let Some(cache) = self.current.as_ref().filter(|c| c.session_mode() == mode) {
                return Ok(Arc::clone(cache));
            }
        }

        let definitions = catalog.scan_ordered_by_name()?;
        let mut cache = build(&definitions, mode)?;
        self.generation += 1;
        cache.generation = self.generation;

        let stats = cache.stats();
        debug!(
            generation = self.generation,
            scanned = stats.scanned,
            eligible = stats.eligible,
            skipped = stats.skipped,
            buckets = cache.len(),
            session_mode = ?mode,
            "rebuilt event trigger cache"
        );

        let cache = Arc::new(cache);
        self.current = Some(Arc::clone(&cache));
        self.valid = true;
        self.rebuilds += 1;
        Ok(cache)
    }

    /// Marks the cache stale. Entries are left untouched until the next rebuild.
    pub fn invalidate(&mut self) {
        if self.valid {
            debug!(generation = self.generation, "invalidated event trigger cache");
        }
        self.valid = false;
    }

    /// Whether the next `get` can serve the current generation.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Generation of the most recent build; 0 before the first one.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of rebuilds performed.
    #[must_use]
    pub const fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::command::CommandKind;
    use crate::error::KyroError;
    use crate::event::{FiringMode, Phase};
    use crate::storage::{ChangeNotifier, ChangeSubscription, InMemoryTriggerCatalog, StorageError};
    use crate::trigger::TriggerDefinition;

    fn def(name: &str) -> TriggerDefinition {
        TriggerDefinition::builder()
            .name(name)
            .phase(Phase::BeforeStart)
            .firing_mode(FiringMode::Always)
            .build()
            .unwrap()
    }

    fn names(cache: &TriggerCache) -> Vec<String> {
        cache
            .resolve(Phase::BeforeStart, CommandKind::CreateTable)
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    /// Catalog wrapper counting scans and optionally failing them.
    struct CountingCatalog {
        inner: InMemoryTriggerCatalog,
        scans: AtomicUsize,
        fail: bool,
    }

    impl TriggerCatalog for CountingCatalog {
        fn scan_ordered_by_name(&self) -> Result<Vec<TriggerDefinition>, StorageError> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StorageError::BackendError("scan failed".to_string()));
            }
            self.inner.scan_ordered_by_name()
        }

        fn subscribe(&self) -> ChangeSubscription {
            self.inner.subscribe()
        }
    }

    fn counting(fail: bool) -> CountingCatalog {
        CountingCatalog {
            inner: InMemoryTriggerCatalog::new(),
            scans: AtomicUsize::new(0),
            fail,
        }
    }

    #[test]
    fn test_get_builds_once_per_validity_cycle() {
        let catalog = counting(false);
        catalog.inner.create(def("a")).unwrap();
        let mut store = CacheStore::new(InvalidationListener::new(catalog.subscribe()));
        assert!(!store.is_valid());

        let first = store.get(&catalog, SessionMode::Origin).unwrap();
        let second = store.get(&catalog, SessionMode::Origin).unwrap();
        let third = store.get(&catalog, SessionMode::Origin).unwrap();

        assert_eq!(catalog.scans.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&second, &third));
        assert_eq!(store.rebuild_count(), 1);
        assert_eq!(first.generation(), 1);
    }

    #[test]
    fn test_catalog_change_triggers_lazy_rebuild() {
        let catalog = counting(false);
        catalog.inner.create(def("a")).unwrap();
        let mut store = CacheStore::new(InvalidationListener::new(catalog.subscribe()));

        let before = store.get(&catalog, SessionMode::Origin).unwrap();
        catalog.inner.create(def("b")).unwrap();
        // Nothing rebuilds until the next lookup.
        assert_eq!(catalog.scans.load(Ordering::SeqCst), 1);

        let after = store.get(&catalog, SessionMode::Origin).unwrap();
        assert_eq!(catalog.scans.load(Ordering::SeqCst), 2);
        assert_eq!(names(&before), vec!["a"]);
        assert_eq!(names(&after), vec!["a", "b"]);
        assert_eq!(after.generation(), 2);
    }

    #[test]
    fn test_without_invalidation_serves_previous_generation() {
        let catalog = InMemoryTriggerCatalog::new();
        catalog.create(def("a")).unwrap();
        // A listener on an unrelated channel never hears about catalog writes.
        let unrelated = ChangeNotifier::new(1);
        let mut store = CacheStore::new(InvalidationListener::new(unrelated.subscribe()));

        assert_eq!(names(&store.get(&catalog, SessionMode::Origin).unwrap()), vec!["a"]);
        catalog.create(def("b")).unwrap();
        assert_eq!(names(&store.get(&catalog, SessionMode::Origin).unwrap()), vec!["a"]);

        store.invalidate();
        assert_eq!(
            names(&store.get(&catalog, SessionMode::Origin).unwrap()),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_mode_change_rebuilds() {
        let catalog = counting(false);
        let mut store = CacheStore::new(InvalidationListener::new(catalog.subscribe()));

        let origin = store.get(&catalog, SessionMode::Origin).unwrap();
        let replica = store.get(&catalog, SessionMode::Replica).unwrap();

        assert_eq!(catalog.scans.load(Ordering::SeqCst), 2);
        assert_eq!(origin.session_mode(), SessionMode::Origin);
        assert_eq!(replica.session_mode(), SessionMode::Replica);
    }

    #[test]
    fn test_failed_rebuild_keeps_store_invalid() {
        let catalog = counting(true);
        let mut store = CacheStore::new(InvalidationListener::new(catalog.subscribe()));

        let err = store.get(&catalog, SessionMode::Origin).unwrap_err();
        assert!(matches!(err, KyroError::Execution(_)));
        assert!(!store.is_valid());
        assert_eq!(store.generation(), 0);

        assert!(store.get(&catalog, SessionMode::Origin).is_err());
        assert_eq!(catalog.scans.load(Ordering::SeqCst), 2);
    }
}
