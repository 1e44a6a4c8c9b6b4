//! Abstract trigger catalog trait.
//!
//! The catalog owns trigger definitions. The cache only ever reads it through
//! an ordered full scan and learns about changes through a subscription.

use thiserror::Error;

use crate::trigger::TriggerDefinition;

use super::notify::ChangeSubscription;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Trigger not found.
    #[error("Trigger not found: {0}")]
    TriggerNotFound(String),

    /// Key already exists.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Backend error.
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// A change to the trigger catalog, as broadcast to subscribers.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogChange {
    Created { name: String },
    Altered { name: String },
    Renamed { from: String, to: String },
    Dropped { name: String },
}

/// Storage trait for the trigger catalog.
///
/// # Contract
/// - `scan_ordered_by_name` yields definitions in strictly increasing name
///   order and must not observe a definition change halfway through a scan.
/// - Every committed change is announced to every live subscription.
pub trait TriggerCatalog: Send + Sync {
    /// Full scan of all trigger definitions, ordered by name.
    fn scan_ordered_by_name(&self) -> Result<Vec<TriggerDefinition>, StorageError>;

    /// Registers a change listener.
    fn subscribe(&self) -> ChangeSubscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the trait is object-safe
    fn _assert_trigger_catalog_object_safe(_: &dyn TriggerCatalog) {}

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::TriggerNotFound("audit".to_string());
        assert!(err.to_string().contains("Trigger not found"));

        let err = StorageError::BackendError("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
