//! Trigger catalog collaborator.
//!
//! The trait defines the contract the cache relies on; the in-memory backend
//! serves embedded usage and tests.

mod memory;
mod notify;
mod traits;

pub use memory::InMemoryTriggerCatalog;
pub use notify::{ChangeNotifier, ChangeSubscription, Drained, DEFAULT_NOTIFICATION_CAPACITY};
pub use traits::{CatalogChange, StorageError, TriggerCatalog};
