//! Error types for event trigger resolution and dispatch.
//!
//! Errors are strongly typed using thiserror and split by who can act on them:
//! validation errors are user errors reported at trigger-definition time,
//! execution errors come from collaborators, invariant errors are fatal bugs
//! in the catalog or the cache builder, and hook errors are raised by the
//! invoked hooks themselves.

use thiserror::Error;

use crate::dispatch::HookError;
use crate::storage::StorageError;

/// Validation errors that occur while compiling trigger definitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unrecognized filter value \"{tag}\" for filter variable \"TAG\"")]
    InvalidFilterTag {
        tag: String,
    },

    #[error("event \"{phase}\" does not support command \"{command}\"")]
    UnsupportedCommandFilter {
        phase: String,
        command: String,
    },

    #[error("unrecognized event name \"{label}\"")]
    UnknownPhase {
        label: String,
    },

    #[error("unrecognized firing mode '{code}'")]
    InvalidFiringMode {
        code: char,
    },

    #[error("Trigger name cannot be empty")]
    EmptyTriggerName,

    #[error("Required field '{field}' is missing")]
    MissingField {
        field: String,
    },

    #[error("Field '{field}' exceeds maximum length of {max_length}")]
    FieldTooLong {
        field: String,
        max_length: usize,
    },

    #[error("invalid event trigger configuration: {message}")]
    InvalidConfig {
        message: String,
    },
}

/// Execution errors raised by collaborators or lifecycle misuse.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("event trigger cache used before init_cache()")]
    CacheNotInitialized,
}

/// Fatal invariant violations.
///
/// These indicate a bug in the trigger catalog or in the cache builder.
/// They abort the current operation and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("catalog scan out of order: \"{previous}\" followed by \"{current}\"")]
    UnorderedScan {
        previous: String,
        current: String,
    },

    #[error("trigger \"{trigger}\" has an empty command filter")]
    EmptyCommandFilter {
        trigger: String,
    },

    #[error(
        "trigger \"{trigger}\" filters on unsupported command \"{command}\" for event \"{phase}\""
    )]
    UnsupportedFilterInCatalog {
        trigger: String,
        phase: String,
        command: String,
    },
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum KyroError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantError),

    /// A hook raised an error; the remaining hooks of the dispatch were skipped.
    #[error("event trigger \"{trigger}\" failed: {source}")]
    Hook {
        trigger: String,
        #[source]
        source: HookError,
    },
}

impl KyroError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if this error was raised by a hook.
    #[must_use]
    pub const fn is_hook(&self) -> bool {
        matches!(self, Self::Hook { .. })
    }

    /// Returns true if this error signals a bug rather than bad input.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }

    /// Returns the hook error when this error was raised by a hook.
    #[must_use]
    pub const fn hook_error(&self) -> Option<&HookError> {
        match self {
            Self::Hook { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StorageError> for KyroError {
    fn from(err: StorageError) -> Self {
        Self::Execution(ExecutionError::Storage(err))
    }
}

/// Result type alias for event trigger operations.
pub type KyroResult<T> = Result<T, KyroError>;
