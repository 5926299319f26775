//! Adapter configuration.

use crate::ident::Quoting;
use crate::monitor::QueryHook;
use std::fmt;
use std::sync::Arc;

/// Configuration shared by the dialect adapters.
#[derive(Clone, Default)]
pub struct AdapterConfig {
    /// Prepared statement cache configuration (per adapter instance).
    pub statement_cache: StatementCacheConfig,
    /// Identifier quoting used when compiling statements.
    pub quoting: Quoting,
    /// Observation hooks, called in registration order.
    pub hooks: Vec<Arc<dyn QueryHook>>,
}

/// Prepared statement cache configuration.
///
/// Only adapters that cache statements honor this.
#[derive(Debug, Clone, Default)]
pub struct StatementCacheConfig {
    /// Maximum number of cached statements. `None` means unbounded.
    pub capacity: Option<usize>,
}

impl AdapterConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the statement cache, evicting the least recently used entry.
    pub fn statement_cache_capacity(mut self, capacity: usize) -> Self {
        self.statement_cache.capacity = Some(capacity);
        self
    }

    /// Set identifier quoting, e.g. [`Quoting::DoubleQuote`] for `ANSI_QUOTES` servers.
    pub fn quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    /// Add an observation hook.
    pub fn hook(mut self, hook: impl QueryHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Add a shared observation hook.
    pub fn shared_hook(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Log every statement through `tracing` at DEBUG level.
    #[cfg(feature = "tracing")]
    pub fn tracing(self) -> Self {
        self.hook(crate::monitor::TracingSqlHook::new())
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("statement_cache", &self.statement_cache)
            .field("quoting", &self.quoting)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
