//! Phases, firing modes and session modes.
//!
//! A phase is the point in command processing a hook fires at. Whether a
//! trigger is eligible at all depends on its firing mode and on the
//! session's replication-role equivalent, read when the cache is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::command::CommandKind;
use crate::error::ValidationError;

/// Point in command processing at which an event trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Before the command starts executing.
    BeforeStart,
    /// After the command has finished.
    AfterEnd,
    /// While permissions on the target are being checked.
    SecurityCheck,
    /// After the command's catalog changes are validated for consistency.
    ConsistencyCheck,
    /// While the command resolves the name of an existing object.
    NameLookup,
}

impl Phase {
    /// Every phase.
    pub const ALL: [Self; 5] = [
        Self::BeforeStart,
        Self::AfterEnd,
        Self::SecurityCheck,
        Self::ConsistencyCheck,
        Self::NameLookup,
    ];

    /// Label passed to hooks and used in trigger definitions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BeforeStart => "command_start",
            Self::AfterEnd => "command_end",
            Self::SecurityCheck => "security_check",
            Self::ConsistencyCheck => "consistency_check",
            Self::NameLookup => "name_lookup",
        }
    }

    /// Whether a trigger for this phase may filter on (and fire for) `command`.
    ///
    /// Commands managing event triggers never fire hooks. Name lookup only
    /// happens for commands that resolve an existing object.
    #[must_use]
    pub const fn supports(self, command: CommandKind) -> bool {
        if !command.supports_event_triggers() {
            return false;
        }
        match self {
            Self::NameLookup => {
                !command.creates_new_object() && !matches!(command, CommandKind::Load)
            }
            _ => true,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownPhase {
                label: s.to_string(),
            })
    }
}

/// Replication-role equivalent of the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Regular session applying its own changes.
    #[default]
    Origin,
    /// Session applying replicated changes.
    Replica,
    /// Local session; behaves like origin for firing decisions.
    Local,
}

/// When a trigger fires, relative to the session mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiringMode {
    /// Never fires.
    Disabled,
    /// Fires unless the session is a replica.
    #[default]
    OriginOnly,
    /// Fires only in replica sessions.
    ReplicaOnly,
    /// Fires in every session.
    Always,
}

impl FiringMode {
    /// Whether a trigger in this mode is eligible in a session running in `mode`.
    #[must_use]
    pub const fn fires_in(self, mode: SessionMode) -> bool {
        match self {
            Self::Disabled => false,
            Self::OriginOnly => !matches!(mode, SessionMode::Replica),
            Self::ReplicaOnly => matches!(mode, SessionMode::Replica),
            Self::Always => true,
        }
    }

    /// Single-character catalog encoding.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Disabled => 'D',
            Self::OriginOnly => 'O',
            Self::ReplicaOnly => 'R',
            Self::Always => 'A',
        }
    }
}

impl TryFrom<char> for FiringMode {
    type Error = ValidationError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'D' => Ok(Self::Disabled),
            'O' => Ok(Self::OriginOnly),
            'R' => Ok(Self::ReplicaOnly),
            'A' => Ok(Self::Always),
            other => Err(ValidationError::InvalidFiringMode { code: other }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_label_round_trip() {
        for phase in Phase::ALL {
            assert_eq!(phase.label().parse::<Phase>().unwrap(), phase);
        }
        assert_eq!("COMMAND_START".parse::<Phase>().unwrap(), Phase::BeforeStart);
    }

    #[test]
    fn test_phase_rejects_unknown_label() {
        let err = "ddl_whenever".parse::<Phase>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownPhase { .. }));
    }

    #[test]
    fn test_support_matrix() {
        assert!(Phase::BeforeStart.supports(CommandKind::CreateTable));
        assert!(!Phase::BeforeStart.supports(CommandKind::CreateEventTrigger));
        assert!(!Phase::NameLookup.supports(CommandKind::CreateTable));
        assert!(!Phase::NameLookup.supports(CommandKind::Load));
        assert!(Phase::NameLookup.supports(CommandKind::CreateIndex));
        assert!(Phase::NameLookup.supports(CommandKind::DropTable));
        assert!(Phase::NameLookup.supports(CommandKind::AlterTable));
    }

    #[test]
    fn test_fires_in_matrix() {
        use SessionMode::{Local, Origin, Replica};

        for mode in [Origin, Replica, Local] {
            assert!(!FiringMode::Disabled.fires_in(mode));
            assert!(FiringMode::Always.fires_in(mode));
        }
        assert!(FiringMode::OriginOnly.fires_in(Origin));
        assert!(FiringMode::OriginOnly.fires_in(Local));
        assert!(!FiringMode::OriginOnly.fires_in(Replica));
        assert!(FiringMode::ReplicaOnly.fires_in(Replica));
        assert!(!FiringMode::ReplicaOnly.fires_in(Origin));
        assert!(!FiringMode::ReplicaOnly.fires_in(Local));
    }

    #[test]
    fn test_firing_mode_codes() {
        for mode in [
            FiringMode::Disabled,
            FiringMode::OriginOnly,
            FiringMode::ReplicaOnly,
            FiringMode::Always,
        ] {
            assert_eq!(FiringMode::try_from(mode.code()).unwrap(), mode);
        }
        assert_eq!(
            FiringMode::try_from('x').unwrap_err(),
            ValidationError::InvalidFiringMode { code: 'x' }
        );
    }
}
