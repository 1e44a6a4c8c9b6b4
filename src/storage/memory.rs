//! In-memory trigger catalog.
//!
//! Thread-safe reference backend for embedded usage and tests. Definitions
//! live in a `BTreeMap` keyed by name, so a scan is ordered by construction
//! and runs under the read lock, which keeps writers out for its duration.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::event::FiringMode;
use crate::trigger::{TriggerDefinition, TriggerName};

use super::notify::{ChangeNotifier, ChangeSubscription, DEFAULT_NOTIFICATION_CAPACITY};
use super::traits::{CatalogChange, StorageError, TriggerCatalog};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

/// Thread-safe in-memory trigger catalog.
#[derive(Debug)]
pub struct InMemoryTriggerCatalog {
    state: RwLock<BTreeMap<TriggerName, TriggerDefinition>>,
    notifier: ChangeNotifier,
}

impl InMemoryTriggerCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_notification_capacity(DEFAULT_NOTIFICATION_CAPACITY)
    }

    /// Create a new empty catalog whose subscriptions buffer `capacity` changes.
    #[must_use]
    pub fn with_notification_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
            notifier: ChangeNotifier::new(capacity),
        }
    }

    /// Insert a new trigger. Fails if the name is taken.
    pub fn create(&self, definition: TriggerDefinition) -> Result<(), StorageError> {
        let name = definition.name.to_string();
        {
            let mut state = self.state.write().map_err(|_| lock_err("catalog.create"))?;
            if state.contains_key(&definition.name) {
                return Err(StorageError::DuplicateKey(name));
            }
            state.insert(definition.name.clone(), definition);
        }
        self.notifier.notify(&CatalogChange::Created { name });
        Ok(())
    }

    /// Get a trigger by name.
    pub fn get(&self, name: &str) -> Result<Option<TriggerDefinition>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("catalog.get"))?;
        Ok(state.get(name).cloned())
    }

    /// Rename a trigger. Fails if `from` is missing or `to` is taken.
    pub fn rename(&self, from: &str, to: TriggerName) -> Result<(), StorageError> {
        {
            let mut state = self.state.write().map_err(|_| lock_err("catalog.rename"))?;
            if state.contains_key(&to) {
                return Err(StorageError::DuplicateKey(to.to_string()));
            }
            let Some(mut definition) = state.remove(from) else {
                return Err(StorageError::TriggerNotFound(from.to_string()));
            };
            definition.name = to.clone();
            state.insert(to.clone(), definition);
        }
        self.notifier.notify(&CatalogChange::Renamed {
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }

    /// Enable or disable a trigger (`ALTER EVENT TRIGGER ... ENABLE/DISABLE`).
    pub fn set_firing_mode(&self, name: &str, mode: FiringMode) -> Result<(), StorageError> {
        {
            let mut state = self.state.write().map_err(|_| lock_err("catalog.set_firing_mode"))?;
            let definition = state
                .get_mut(name)
                .ok_or_else(|| StorageError::TriggerNotFound(name.to_string()))?;
            definition.firing_mode = mode;
        }
        self.notifier.notify(&CatalogChange::Altered {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Delete a trigger. Returns error if not found.
    pub fn drop_trigger(&self, name: &str) -> Result<TriggerDefinition, StorageError> {
        let removed = {
            let mut state = self.state.write().map_err(|_| lock_err("catalog.drop"))?;
            state
                .remove(name)
                .ok_or_else(|| StorageError::TriggerNotFound(name.to_string()))?
        };
        self.notifier.notify(&CatalogChange::Dropped {
            name: name.to_string(),
        });
        Ok(removed)
    }

    /// Number of stored triggers.
    pub fn len(&self) -> Result<usize, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("catalog.len"))?;
        Ok(state.len())
    }

    /// Returns true if no trigger is stored.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Number of change subscriptions as of the last write.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }
}

impl Default for InMemoryTriggerCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerCatalog for InMemoryTriggerCatalog {
    fn scan_ordered_by_name(&self) -> Result<Vec<TriggerDefinition>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("catalog.scan"))?;
        Ok(state.values().cloned().collect())
    }

    fn subscribe(&self) -> ChangeSubscription {
        self.notifier.subscribe()
    }
}
