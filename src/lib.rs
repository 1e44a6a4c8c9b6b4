//! # KyroQL Event Triggers - command lifecycle hook dispatch
//!
//! Event triggers attach user hooks to points in command processing rather
//! than to row changes. Whenever a command reaches one of those points, the
//! engine asks which hooks to run and runs them in a deterministic order.
//! That question is asked for every command, so the answer is served from a
//! per-session cache that is rebuilt lazily after catalog changes.
//!
//! ## Core Concepts
//!
//! - **Phase**: the point in command processing a trigger fires at
//! - **CommandKind**: the command tag a trigger may filter on
//! - **TriggerDefinition**: name, phase, command filter, firing mode and hook
//! - **TriggerCache**: `(phase, command-or-ANY)` index with name-ordered buckets
//! - **EventTriggerSession**: lifecycle, invalidation and dispatch for one session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kyroql_evtrigger::{
//!     CommandKind, EventTriggerConfig, EventTriggerSession, HookContext, HookError, HookRef,
//!     Phase, TriggerDefinition,
//! };
//!
//! let invoker = Arc::new(|hook: &HookRef, ctx: &HookContext| -> Result<(), HookError> {
//!     println!("{hook} fired for {} at {}", ctx.command_tag(), ctx.phase_label());
//!     Ok(())
//! });
//! let (mut session, catalog) =
//!     EventTriggerSession::with_in_memory_catalog(EventTriggerConfig::default(), invoker);
//! session.init_cache();
//!
//! catalog.create(
//!     TriggerDefinition::builder()
//!         .name("no_drops")
//!         .phase(Phase::BeforeStart)
//!         .tag("DROP TABLE")
//!         .build()?,
//! )?;
//!
//! let ctx = HookContext::new(Phase::BeforeStart, CommandKind::DropTable);
//! session.fire(Phase::BeforeStart, CommandKind::DropTable, &ctx)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod command;
pub mod error;
pub mod event;
pub mod trigger;

// Catalog, cache and dispatch
pub mod cache;
pub mod config;
pub mod dispatch;
pub mod session;
pub mod storage;

// Re-export primary types at crate root for convenience
pub use cache::{CacheKey, CacheStore, HookEntry, TriggerCache};
pub use command::{classify, parse_filter_tag, CommandKind, ObjectKind, StatementShape};
pub use config::EventTriggerConfig;
pub use dispatch::{
    Dispatcher, FireReport, HookContext, HookError, HookInvoker, ObjectId, RawCommand,
};
pub use error::{ExecutionError, InvariantError, KyroError, KyroResult, ValidationError};
pub use event::{FiringMode, Phase, SessionMode};
pub use session::EventTriggerSession;
pub use storage::{CatalogChange, InMemoryTriggerCatalog, StorageError, TriggerCatalog};
pub use trigger::{CommandFilter, CommandSelector, HookRef, TriggerDefinition, TriggerName};
