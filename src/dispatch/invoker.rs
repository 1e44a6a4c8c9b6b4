use thiserror::Error;

use crate::trigger::HookRef;

use super::context::HookContext;

/// Error raised by a hook. Propagated to the command's caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    /// Human-readable message.
    pub message: String,
    /// Optional machine-readable error code.
    pub code: Option<String>,
}

impl HookError {
    /// Creates an error without a code.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attaches an error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Runs the function behind a [`HookRef`].
pub trait HookInvoker: Send + Sync {
    /// Invokes `hook` with `context`.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the hook.
    fn invoke(&self, hook: &HookRef, context: &HookContext) -> Result<(), HookError>;
}

impl<F> HookInvoker for F
where
    F: Fn(&HookRef, &HookContext) -> Result<(), HookError> + Send + Sync,
{
    fn invoke(&self, hook: &HookRef, context: &HookContext) -> Result<(), HookError> {
        self(hook, context)
    }
}
