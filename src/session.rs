//! Per-session entry point.
//!
//! An [`EventTriggerSession`] ties a catalog, a hook invoker and the session's
//! cache together. The command-processing pipeline calls [`EventTriggerSession::fire`]
//! (or [`EventTriggerSession::fire_statement`]) at each phase boundary.
//!
//! ```rust,ignore
//! let catalog = Arc::new(InMemoryTriggerCatalog::new());
//! let mut session =
//!     EventTriggerSession::new(EventTriggerConfig::default(), catalog.clone(), invoker);
//! session.init_cache();
//!
//! catalog.create(
//!     TriggerDefinition::builder()
//!         .name("audit_ddl")
//!         .phase(Phase::AfterEnd)
//!         .tag("CREATE TABLE")
//!         .build()?,
//! )?;
//!
//! let ctx = HookContext::new(Phase::AfterEnd, CommandKind::CreateTable);
//! let report = session.fire(Phase::AfterEnd, CommandKind::CreateTable, &ctx)?;
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{CacheStore, InvalidationListener, TriggerCache};
use crate::command::{classify, CommandKind, ObjectKind, StatementShape};
use crate::config::EventTriggerConfig;
use crate::dispatch::{Dispatcher, FireReport, HookContext, HookInvoker};
use crate::error::{ExecutionError, KyroResult};
use crate::event::{Phase, SessionMode};
use crate::storage::{InMemoryTriggerCatalog, TriggerCatalog};

/// Event trigger state owned by one session.
///
/// Not shared between threads: every session holds its own cache and its own
/// catalog subscription.
pub struct EventTriggerSession {
    config: EventTriggerConfig,
    catalog: Arc<dyn TriggerCatalog>,
    dispatcher: Dispatcher,
    session_mode: SessionMode,
    store: Option<CacheStore>,
}

impl std::fmt::Debug for EventTriggerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTriggerSession")
            .field("config", &self.config)
            .field("session_mode", &self.session_mode)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl EventTriggerSession {
    /// Creates a session. The cache is not set up until [`Self::init_cache`].
    #[must_use]
    pub fn new(
        config: EventTriggerConfig,
        catalog: Arc<dyn TriggerCatalog>,
        invoker: Arc<dyn HookInvoker>,
    ) -> Self {
        let config = config.normalized();
        Self {
            session_mode: config.session_mode,
            config,
            catalog,
            dispatcher: Dispatcher::new(invoker),
            store: None,
        }
    }

    /// Creates a session over a fresh in-memory catalog sized from `config`.
    #[must_use]
    pub fn with_in_memory_catalog(
        config: EventTriggerConfig,
        invoker: Arc<dyn HookInvoker>,
    ) -> (Self, Arc<InMemoryTriggerCatalog>) {
        let config = config.normalized();
        let catalog = Arc::new(InMemoryTriggerCatalog::with_notification_capacity(
            config.notification_capacity,
        ));
        let session = Self::new(config, Arc::clone(&catalog) as Arc<dyn TriggerCatalog>, invoker);
        (session, catalog)
    }

    /// Subscribes to catalog changes and sets up an empty, invalid cache.
    ///
    /// Calling it again while initialized does nothing.
    pub fn init_cache(&mut self) {
        if self.store.is_some() {
            return;
        }
        let listener = InvalidationListener::new(self.catalog.subscribe());
        self.store = Some(CacheStore::new(listener));
        info!(
            session_mode = ?self.session_mode,
            enabled = self.config.enabled,
            "event trigger cache initialized"
        );
    }

    /// Drops the cache and the catalog subscription.
    pub fn shutdown_cache(&mut self) {
        if let Some(store) = self.store.take() {
            info!(
                generation = store.generation(),
                rebuilds = store.rebuild_count(),
                "event trigger cache shut down"
            );
        }
    }

    /// Whether [`Self::init_cache`] has run since the last shutdown.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    /// Current session mode.
    #[must_use]
    pub const fn session_mode(&self) -> SessionMode {
        self.session_mode
    }

    /// Changes the session mode. Firing eligibility is decided at build time,
    /// so a change invalidates the cache.
    pub fn set_session_mode(&mut self, mode: SessionMode) {
        if self.session_mode == mode {
            return;
        }
        debug!(from = ?self.session_mode, to = ?mode, "session mode changed");
        self.session_mode = mode;
        if let Some(store) = self.store.as_mut() {
            store.invalidate();
        }
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &EventTriggerConfig {
        &self.config
    }

    /// Flips the global switch.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Generation of the last built cache; `None` before `init_cache`.
    #[must_use]
    pub fn cache_generation(&self) -> Option<u64> {
        self.store.as_ref().map(CacheStore::generation)
    }

    /// Number of cache rebuilds since `init_cache`.
    #[must_use]
    pub fn rebuild_count(&self) -> Option<u64> {
        self.store.as_ref().map(CacheStore::rebuild_count)
    }

    /// Current cache, rebuilt first if stale.
    ///
    /// # Errors
    ///
    /// Fails before `init_cache`, and when the rebuild fails.
    pub fn cache(&mut self) -> KyroResult<Arc<TriggerCache>> {
        let store = self.store.as_mut().ok_or(ExecutionError::CacheNotInitialized)?;
        store.get(self.catalog.as_ref(), self.session_mode)
    }

    /// Whether any hook would fire for `(phase, command)`.
    ///
    /// # Errors
    ///
    /// Fails before `init_cache`, and when a stale cache cannot be rebuilt.
    pub fn has_any(&mut self, phase: Phase, command: CommandKind) -> KyroResult<bool> {
        self.ensure_initialized()?;
        if !self.config.enabled {
            return Ok(false);
        }
        Ok(self.cache()?.has_any(phase, command))
    }

    /// Invokes every hook registered for `(phase, command)` in name order.
    ///
    /// # Errors
    ///
    /// Fails before `init_cache`, when a stale cache cannot be rebuilt, and
    /// with [`crate::KyroError::Hook`] when a hook raises an error.
    pub fn fire(
        &mut self,
        phase: Phase,
        command: CommandKind,
        context: &HookContext,
    ) -> KyroResult<FireReport> {
        self.ensure_initialized()?;
        if !self.config.enabled {
            return Ok(FireReport::empty(phase, command, self.cache_generation().unwrap_or(0)));
        }
        let cache = self.cache()?;
        self.dispatcher.fire(&cache, phase, command, context)
    }

    /// Classifies a statement and fires its hooks.
    ///
    /// `build_context` only runs when at least one hook will fire. Returns
    /// `None` when the statement is not classified or nothing is registered.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fire`].
    pub fn fire_statement<F>(
        &mut self,
        phase: Phase,
        shape: StatementShape,
        sub_kind: Option<ObjectKind>,
        build_context: F,
    ) -> KyroResult<Option<FireReport>>
    where
        F: FnOnce(Phase, CommandKind) -> HookContext,
    {
        self.ensure_initialized()?;
        let Some(command) = classify(shape, sub_kind) else {
            return Ok(None);
        };
        if !self.config.enabled {
            return Ok(None);
        }

        let cache = self.cache()?;
        if !cache.has_any(phase, command) {
            return Ok(None);
        }
        let context = build_context(phase, command);
        self.dispatcher.fire(&cache, phase, command, &context).map(Some)
    }

    fn ensure_initialized(&self) -> KyroResult<()> {
        if self.store.is_none() {
            return Err(ExecutionError::CacheNotInitialized.into());
        }
        Ok(())
    }
}
