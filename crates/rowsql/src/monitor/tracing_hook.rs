use super::{QueryContext, QueryHook, truncate_sql_bytes};
use tracing::Level;

/// A `tracing`-based hook that emits each statement before it is executed.
///
/// Only statements are emitted. Failures are returned to the caller and
/// never logged here.
///
/// Enable via the crate feature: `rowsql = { features = ["tracing"] }`.
#[derive(Debug, Clone)]
pub struct TracingSqlHook {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingSqlHook {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl TracingSqlHook {
    /// Create a new hook with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

impl QueryHook for TracingSqlHook {
    fn before_query(&self, ctx: &QueryContext) {
        let sql = self.truncate_sql(&ctx.sql);
        let operation = ctx.operation.map_or("-", |op| op.keyword());
        emit_at_level!(
            self.level,
            target: "rowsql.sql",
            dialect = %ctx.dialect,
            operation,
            param_count = ctx.param_count,
            sql = %sql,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{Dialect, Operation};
    use crate::monitor::QueryOutcome;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tracing::span;

    /// Subscriber that only counts events.
    struct CountEvents(Arc<AtomicUsize>);

    impl tracing::Subscriber for CountEvents {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }

        fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

        fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

        fn event(&self, _: &tracing::Event<'_>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn enter(&self, _: &span::Id) {}

        fn exit(&self, _: &span::Id) {}
    }

    #[test]
    fn truncates_long_sql() {
        let hook = TracingSqlHook::new().max_sql_length(6);
        assert_eq!(hook.truncate_sql("SELECT * FROM t"), "SELECT...");
        assert_eq!(hook.no_truncate().truncate_sql("SELECT * FROM t"), "SELECT * FROM t");
    }

    #[test]
    fn emits_statements_but_not_failures() {
        let events = Arc::new(AtomicUsize::new(0));
        let hook = TracingSqlHook::new();
        let ctx = QueryContext::new(Dialect::Mysql, "DELETE FROM `t` WHERE `id` = :where_0", 1)
            .with_operation(Some(Operation::Delete));

        tracing::subscriber::with_default(CountEvents(Arc::clone(&events)), || {
            hook.before_query(&ctx);
            hook.after_query(
                &ctx,
                Duration::from_millis(2),
                &QueryOutcome::Error("Driver error: lock wait timeout".to_string()),
            );
        });

        assert_eq!(events.load(Ordering::SeqCst), 1);
    }
}
