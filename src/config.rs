//! Session configuration for event trigger dispatch.

use serde::{Deserialize, Serialize};

use crate::error::{KyroResult, ValidationError};
use crate::event::SessionMode;
use crate::storage::DEFAULT_NOTIFICATION_CAPACITY;

/// Tunables for an [`crate::EventTriggerSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTriggerConfig {
    /// Global switch. When off nothing fires and `has_any` is always false.
    pub enabled: bool,
    /// Session mode the cache is first built for.
    pub session_mode: SessionMode,
    /// Buffered catalog change notifications per subscriber.
    pub notification_capacity: usize,
}

impl Default for EventTriggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            session_mode: SessionMode::Origin,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }
}

impl EventTriggerConfig {
    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfig`] for malformed JSON or
    /// unknown enum values.
    pub fn from_json(json: &str) -> KyroResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ValidationError::InvalidConfig {
            message: e.to_string(),
        })?;
        Ok(config.normalized())
    }

    /// Clamps values into their valid ranges.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.notification_capacity = self.notification_capacity.max(1);
        self
    }

    /// Builder-style setter for [`Self::enabled`].
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder-style setter for [`Self::session_mode`].
    #[must_use]
    pub const fn with_session_mode(mut self, mode: SessionMode) -> Self {
        self.session_mode = mode;
        self
    }
}
