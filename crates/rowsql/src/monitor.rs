//! Query observation hooks.
//!
//! Hooks see every statement an adapter sends to its driver, before and after
//! execution. They observe only: they cannot rewrite or abort a statement,
//! and errors still propagate to the caller unchanged.
//!
//! # Example
//!
//! ```ignore
//! use rowsql::{AdapterConfig, MysqlAdapter};
//! use rowsql::monitor::TracingSqlHook;
//!
//! let config = AdapterConfig::new().hook(TracingSqlHook::new().max_sql_length(500));
//! let db = MysqlAdapter::with_config(driver, config);
//! ```

use crate::adapter::{Dialect, Operation};
use crate::error::DbResult;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
mod tracing_hook;

#[cfg(feature = "tracing")]
pub use tracing_hook::TracingSqlHook;

/// Truncate `sql` to at most `max_bytes` without splitting a character.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Context information about the statement being executed.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// SQL text sent to the driver.
    pub sql: String,
    /// Number of bound parameters.
    pub param_count: usize,
    /// Row operation, `None` for ad-hoc statements.
    pub operation: Option<Operation>,
    /// Dialect of the adapter running the statement.
    pub dialect: Dialect,
    /// Whether the prepared statement came from the statement cache.
    pub cache_hit: Option<bool>,
}

impl QueryContext {
    pub fn new(dialect: Dialect, sql: &str, param_count: usize) -> Self {
        Self {
            sql: sql.to_string(),
            param_count,
            operation: None,
            dialect,
            cache_hit: None,
        }
    }

    pub fn with_operation(mut self, operation: Option<Operation>) -> Self {
        self.operation = operation;
        self
    }
}

/// Outcome of an execution as reported to [`QueryHook::after_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Ok,
    Error(String),
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::Ok => f.write_str("ok"),
            QueryOutcome::Error(e) => write!(f, "error: {e}"),
        }
    }
}

/// Trait for observing statement execution.
pub trait QueryHook: Send + Sync {
    /// Called before the statement is prepared/executed.
    fn before_query(&self, _ctx: &QueryContext) {}

    /// Called after the statement completes (success or failure).
    fn after_query(&self, _ctx: &QueryContext, _duration: Duration, _outcome: &QueryOutcome) {}
}

/// The set of hooks attached to one adapter.
#[derive(Clone, Default)]
pub(crate) struct Hooks(Vec<Arc<dyn QueryHook>>);

impl Hooks {
    pub(crate) fn new(hooks: Vec<Arc<dyn QueryHook>>) -> Self {
        Self(hooks)
    }

    /// Run `f` between the `before_query`/`after_query` callbacks.
    ///
    /// `ctx` is only built when at least one hook is registered. `f` may fill
    /// in the cache-hit flag it receives.
    pub(crate) fn observe<T>(
        &self,
        ctx: impl FnOnce() -> QueryContext,
        f: impl FnOnce(&mut Option<bool>) -> DbResult<T>,
    ) -> DbResult<T> {
        if self.0.is_empty() {
            return f(&mut None);
        }

        let mut ctx = ctx();
        for hook in &self.0 {
            hook.before_query(&ctx);
        }
        let start = Instant::now();
        let result = f(&mut ctx.cache_hit);
        let elapsed = start.elapsed();
        let outcome = match &result {
            Ok(_) => QueryOutcome::Ok,
            Err(e) => QueryOutcome::Error(e.to_string()),
        };
        for hook in &self.0 {
            hook.after_query(&ctx, elapsed, &outcome);
        }
        result
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hooks").field(&self.0.len()).finish()
    }
}
