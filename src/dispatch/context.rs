use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::command::CommandKind;
use crate::event::Phase;

/// Identifier of the object a command acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
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

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-owned parsed command, forwarded to hooks untouched.
#[derive(Clone)]
pub struct RawCommand(Arc<dyn Any + Send + Sync>);

impl RawCommand {
    /// Wraps a parsed command.
    pub fn new<T: Any + Send + Sync>(command: T) -> Self {
        Self(Arc::new(command))
    }

    /// Borrows the command as `T` if that is its concrete type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles point to the same command.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawCommand(..)")
    }
}

/// Data handed to every hook of one dispatch.
#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub struct HookContext {
    pub phase: Phase,
    pub command: CommandKind,
    pub command_text: Option<String>,
    pub object_id: Option<ObjectId>,
    pub schema_name: Option<String>,
    pub object_name: Option<String>,
    pub raw_command: Option<RawCommand>,
    pub fired_at: DateTime<Utc>,
}

impl HookContext {
    /// Creates a context stamped with the current time.
    #[must_use]
    pub fn new(phase: Phase, command: CommandKind) -> Self {
        Self {
            phase,
            command,
            command_text: None,
            object_id: None,
            schema_name: None,
            object_name: None,
            raw_command: None,
            fired_at: Utc::now(),
        }
    }

    /// Phase label as hooks see it, e.g. `command_start`.
    #[must_use]
    pub const fn phase_label(&self) -> &'static str {
        self.phase.label()
    }

    /// Command tag as hooks see it, e.g. `CREATE TABLE`.
    #[must_use]
    pub const fn command_tag(&self) -> &'static str {
        self.command.as_str()
    }

    /// Sets the command text.
    #[must_use]
    pub fn with_command_text(mut self, text: impl Into<String>) -> Self {
        self.command_text = Some(text.into());
        self
    }

    /// Sets the target object id.
    #[must_use]
    pub const fn with_object_id(mut self, id: ObjectId) -> Self {
        self.object_id = Some(id);
        self
    }

    /// Sets the schema and name of the target object.
    #[must_use]
    pub fn with_object_name(mut self, schema: Option<String>, name: impl Into<String>) -> Self {
        self.schema_name = schema;
        self.object_name = Some(name.into());
        self
    }

    /// Attaches the parsed command.
    #[must_use]
    pub fn with_raw_command(mut self, raw: RawCommand) -> Self {
        self.raw_command = Some(raw);
        self
    }
}
