//! Hook dispatch.
//!
//! The dispatcher resolves the hooks for one `(phase, command)` occurrence and
//! invokes them in trigger name order with a shared context. Hooks run on the
//! caller's thread; the first hook error aborts the rest of the dispatch.

mod context;
mod invoker;

use std::sync::Arc;

use tracing::debug;

use crate::cache::TriggerCache;
use crate::command::CommandKind;
use crate::error::{KyroError, KyroResult};
use crate::event::Phase;

pub use context::{HookContext, ObjectId, RawCommand};
pub use invoker::{HookError, HookInvoker};

/// Outcome of one successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireReport {
    /// Phase that fired.
    pub phase: Phase,
    /// Command that fired.
    pub command: CommandKind,
    /// Names of the triggers invoked, in invocation order.
    pub fired: Vec<String>,
    /// Cache generation used.
    pub generation: u64,
}

impl FireReport {
    /// Report for a dispatch that invoked nothing.
    #[must_use]
    pub const fn empty(phase: Phase, command: CommandKind, generation: u64) -> Self {
        Self {
            phase,
            command,
            fired: Vec::new(),
            generation,
        }
    }

    /// Number of hooks invoked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fired.len()
    }

    /// Returns true when nothing fired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}

/// Invokes resolved hooks through a [`HookInvoker`].
#[derive(Clone)]
pub struct Dispatcher {
    invoker: Arc<dyn HookInvoker>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher around `invoker`.
    #[must_use]
    pub fn new(invoker: Arc<dyn HookInvoker>) -> Self {
        Self { invoker }
    }

    /// Cheap pre-check so callers can skip building a context.
    #[must_use]
    pub fn has_any(cache: &TriggerCache, phase: Phase, command: CommandKind) -> bool {
        cache.has_any(phase, command)
    }

    /// Fires every hook registered for `(phase, command)`.
    ///
    /// # Errors
    ///
    /// Returns [`KyroError::Hook`] with the first hook error; hooks after the
    /// failing one are not invoked.
    pub fn fire(
        &self,
        cache: &TriggerCache,
        phase: Phase,
        command: CommandKind,
        context: &HookContext,
    ) -> KyroResult<FireReport> {
        let mut report = FireReport::empty(phase, command, cache.generation());

        for entry in cache.resolve(phase, command) {
            if let Err(source) = self.invoker.invoke(&entry.hook, context) {
                debug!(
                    trigger = entry.name(),
                    phase = %phase,
                    command = %command,
                    fired = report.fired.len(),
                    error = %source,
                    "event trigger aborted dispatch"
                );
                return Err(KyroError::Hook {
                    trigger: entry.name().to_string(),
                    source,
                });
            }
            report.fired.push(entry.name().to_string());
        }

        Ok(report)
    }
}
