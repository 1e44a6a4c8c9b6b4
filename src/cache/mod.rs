//! Event trigger resolution cache.
//!
//! The cache indexes enabled triggers by `(phase, command-or-ANY)`. Each
//! bucket is sorted by trigger name because the builder appends in catalog
//! scan order; the resolver relies on that to merge the ANY bucket and the
//! command bucket in one linear pass.
//!
//! A cache is immutable once built. The store swaps in a new generation
//! wholesale after an invalidation and never patches one in place.

/// Builds a cache from an ordered catalog scan.
pub mod builder;
/// Catalog change listener.
pub mod listener;
/// Ordered merge of the ANY and per-command buckets.
pub mod resolver;
/// Session-owned holder of the current cache generation.
pub mod store;

use std::collections::HashMap;
use std::sync::Arc;

use crate::event::{Phase, SessionMode};
use crate::trigger::{CommandSelector, HookRef};

pub use builder::build;
pub use listener::InvalidationListener;
pub use store::CacheStore;

/// Key of one cache bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Phase the bucket's triggers fire at.
    pub phase: Phase,
    /// ANY, or the command the bucket's triggers filter on.
    pub selector: CommandSelector,
}

impl CacheKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(phase: Phase, selector: CommandSelector) -> Self {
        Self { phase, selector }
    }
}

/// One resolved hook: the trigger name and the function it invokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEntry {
    /// Trigger name.
    pub name: Arc<str>,
    /// Function to invoke.
    pub hook: HookRef,
}

impl HookEntry {
    /// The trigger name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Counters recorded while building a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Definitions read from the catalog.
    pub scanned: usize,
    /// Definitions indexed.
    pub eligible: usize,
    /// Definitions skipped because of their firing mode.
    pub skipped: usize,
}

/// Immutable dispatch index for one cache generation.
#[derive(Debug, Clone, Default)]
pub struct TriggerCache {
    entries: HashMap<CacheKey, Vec<HookEntry>>,
    generation: u64,
    session_mode: SessionMode,
    stats: BuildStats,
}

impl TriggerCache {
    /// Generation number assigned by the store; 0 for a cache built directly.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Session mode the cache was built for.
    #[must_use]
    pub const fn session_mode(&self) -> SessionMode {
        self.session_mode
    }

    /// Build counters.
    #[must_use]
    pub const fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Number of non-empty buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no trigger is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The name-ordered bucket for `key`, empty if absent.
    #[must_use]
    pub fn bucket(&self, key: CacheKey) -> &[HookEntry] {
        self.entries.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}
