//! Event trigger definitions.
//!
//! A definition is what the trigger catalog stores for each trigger: its
//! unique name, the phase it fires at, an optional command filter, its
//! firing mode, and an opaque reference to the hook to invoke.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::command::{parse_filter_tag, CommandKind};
use crate::error::ValidationError;
use crate::event::{FiringMode, Phase};

/// Maximum length of a trigger name, in bytes.
pub const MAX_TRIGGER_NAME_LEN: usize = 63;

/// Unique trigger name, totally ordered by byte comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerName(Arc<str>);

impl TriggerName {
    /// Validates and wraps a trigger name.
    ///
    /// # Errors
    ///
    /// Fails when the name is blank or longer than [`MAX_TRIGGER_NAME_LEN`].
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyTriggerName);
        }
        if name.len() > MAX_TRIGGER_NAME_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "name".to_string(),
                max_length: MAX_TRIGGER_NAME_LEN,
            });
        }
        Ok(Self(Arc::from(name)))
    }

    /// The name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn shared(&self) -> Arc<str> {
        Arc::clone(&self.0)
    }
}

impl fmt::Display for TriggerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TriggerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TriggerName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TriggerName> for String {
    fn from(name: TriggerName) -> Self {
        name.0.to_string()
    }
}

impl TryFrom<&str> for TriggerName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque reference to the function a trigger invokes.
///
/// The cache never looks inside it; it is forwarded to the hook invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookRef(Uuid);

impl HookRef {
    /// Creates a new random hook reference.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for HookRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HookRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Command component of a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandSelector {
    /// Triggers without a command filter.
    Any,
    /// Triggers filtering on one command kind.
    Specific(CommandKind),
}

impl fmt::Display for CommandSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("ANY"),
            Self::Specific(kind) => f.write_str(kind.as_str()),
        }
    }
}

/// Which commands a trigger fires for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "commands", rename_all = "snake_case")]
pub enum CommandFilter {
    /// Fires for every command of its phase.
    #[default]
    Any,
    /// Fires only for the listed commands. Never empty.
    Commands(BTreeSet<CommandKind>),
}

impl CommandFilter {
    /// Compiles a `WHEN TAG IN (...)` tag list for a trigger on `phase`.
    ///
    /// An empty list means no filter.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError::InvalidFilterTag`] for unknown tags and
    /// [`ValidationError::UnsupportedCommandFilter`] for commands the phase
    /// cannot fire for.
    pub fn compile<S: AsRef<str>>(phase: Phase, tags: &[S]) -> Result<Self, ValidationError> {
        if tags.is_empty() {
            return Ok(Self::Any);
        }

        let mut commands = BTreeSet::new();
        for tag in tags {
            let kind = parse_filter_tag(tag.as_ref())?;
            if !phase.supports(kind) {
                return Err(ValidationError::UnsupportedCommandFilter {
                    phase: phase.label().to_string(),
                    command: kind.as_str().to_string(),
                });
            }
            commands.insert(kind);
        }

        Ok(Self::Commands(commands))
    }

    /// Filter on an explicit set of commands.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError::MissingField`] when `commands` is empty.
    pub fn commands(
        commands: impl IntoIterator<Item = CommandKind>,
    ) -> Result<Self, ValidationError> {
        let set: BTreeSet<CommandKind> = commands.into_iter().collect();
        if set.is_empty() {
            return Err(ValidationError::MissingField {
                field: "commands".to_string(),
            });
        }
        Ok(Self::Commands(set))
    }

    /// Whether this filter admits `command`.
    #[must_use]
    pub fn matches(&self, command: CommandKind) -> bool {
        match self {
            Self::Any => true,
            Self::Commands(set) => set.contains(&command),
        }
    }
}

/// A trigger as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// Unique name; dispatch order follows it.
    pub name: TriggerName,
    /// Phase the trigger fires at.
    pub phase: Phase,
    /// Commands the trigger fires for.
    pub filter: CommandFilter,
    /// Whether the trigger fires in the current session.
    pub firing_mode: FiringMode,
    /// Function to invoke.
    pub hook: HookRef,
}

impl TriggerDefinition {
    /// Creates a builder for a new definition.
    #[must_use]
    pub fn builder() -> TriggerDefinitionBuilder {
        TriggerDefinitionBuilder::default()
    }

    /// Whether this trigger is eligible for `(phase, command)` given its filter.
    ///
    /// Firing mode is not considered here.
    #[must_use]
    pub fn applies_to(&self, phase: Phase, command: CommandKind) -> bool {
        self.phase == phase && command.supports_event_triggers() && self.filter.matches(command)
    }
}

/// Builder for [`TriggerDefinition`].
#[derive(Debug, Default)]
pub struct TriggerDefinitionBuilder {
    name: Option<String>,
    phase: Option<Phase>,
    tags: Vec<String>,
    commands: Vec<CommandKind>,
    firing_mode: FiringMode,
    hook: Option<HookRef>,
}

impl TriggerDefinitionBuilder {
    /// Sets the trigger name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the phase.
    #[must_use]
    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Adds a filter tag, validated at build time.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds a command kind to the filter.
    #[must_use]
    pub fn command(mut self, kind: CommandKind) -> Self {
        self.commands.push(kind);
        self
    }

    /// Sets the firing mode. Defaults to origin-only, as a freshly created trigger.
    #[must_use]
    pub fn firing_mode(mut self, mode: FiringMode) -> Self {
        self.firing_mode = mode;
        self
    }

    /// Sets the hook reference. A random one is generated when unset.
    #[must_use]
    pub fn hook(mut self, hook: HookRef) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Validates and builds the definition.
    ///
    /// # Errors
    ///
    /// Fails on a missing or invalid name, a missing phase, an unknown tag, or
    /// a command the phase does not support.
    pub fn build(self) -> Result<TriggerDefinition, ValidationError> {
        let name = TriggerName::new(self.name.ok_or_else(|| ValidationError::MissingField {
            field: "name".to_string(),
        })?)?;
        let phase = self.phase.ok_or_else(|| ValidationError::MissingField {
            field: "phase".to_string(),
        })?;

        let mut tags: Vec<String> = self.tags;
        tags.extend(self.commands.iter().map(|kind| kind.as_str().to_string()));
        let filter = CommandFilter::compile(phase, &tags)?;

        Ok(TriggerDefinition {
            name,
            phase,
            filter,
            firing_mode: self.firing_mode,
            hook: self.hook.unwrap_or_default(),
        })
    }
}
