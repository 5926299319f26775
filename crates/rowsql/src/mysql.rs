//! Full-capability MySQL adapter.
//!
//! Compiles every row operation through [`Compiler`], prepares statements
//! through a per-instance [`StatementCache`] and executes them on the
//! wrapped [`Driver`].
//!
//! # Example
//!
//! ```ignore
//! use rowsql::{Adapter, MysqlAdapter, fields, literal, op};
//!
//! let db = MysqlAdapter::new(driver);
//! db.update(
//!     "users",
//!     &fields! { "status" => "inactive", "updated_at" => literal("NOW()") },
//!     &fields! { "last_login" => op("<", "2024-01-01") },
//!     false,
//! )?;
//! ```

use crate::adapter::{self, Adapter, Dialect, Operation};
use crate::cache::StatementCache;
use crate::compile::{CompiledQuery, Compiler};
use crate::config::AdapterConfig;
use crate::driver::{Driver, ResultSet};
use crate::error::{DbError, DbResult};
use crate::fields::Fields;
use crate::isolation::IsolationLevel;
use crate::monitor::{Hooks, QueryContext};
use crate::params::{DriverOptions, Params};
use crate::value::Value;
use std::sync::Arc;
use uuid::Uuid;

/// MySQL adapter over a raw [`Driver`].
#[derive(Debug)]
pub struct MysqlAdapter<D: Driver> {
    driver: D,
    cache: StatementCache<D::Statement>,
    compiler: Compiler,
    hooks: Hooks,
}

impl<D: Driver> MysqlAdapter<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, AdapterConfig::default())
    }

    pub fn with_config(driver: D, config: AdapterConfig) -> Self {
        Self {
            driver,
            cache: StatementCache::new(config.statement_cache.capacity),
            compiler: Compiler::new(config.quoting),
            hooks: Hooks::new(config.hooks),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn statement_cache(&self) -> &StatementCache<D::Statement> {
        &self.cache
    }

    /// Prepare `sql`, reusing the cached handle for identical `(sql, options)`.
    pub fn prepare(&self, sql: &str, options: &DriverOptions) -> DbResult<Arc<D::Statement>> {
        let (stmt, _) = self
            .cache
            .get_or_prepare(sql, options, || self.driver.prepare(sql, options))?;
        Ok(stmt)
    }

    /// Prepare (cached) and execute `sql` with `params`.
    pub fn execute(&self, sql: &str, params: &Params) -> DbResult<D::Rows> {
        self.execute_with_options(sql, params, &DriverOptions::new())
    }

    /// Like [`execute`](Self::execute), with driver options for `prepare`.
    pub fn execute_with_options(
        &self,
        sql: &str,
        params: &Params,
        options: &DriverOptions,
    ) -> DbResult<D::Rows> {
        self.run(None, sql, params, options)
    }

    /// Execute an already compiled query.
    pub fn execute_compiled(&self, query: &CompiledQuery) -> DbResult<D::Rows> {
        self.execute(&query.sql, &query.params)
    }

    fn run(
        &self,
        operation: Option<Operation>,
        sql: &str,
        params: &Params,
        options: &DriverOptions,
    ) -> DbResult<D::Rows> {
        let ctx = || QueryContext::new(Dialect::Mysql, sql, params.len()).with_operation(operation);
        self.hooks.observe(ctx, |cache_hit| {
            let (stmt, hit) = self
                .cache
                .get_or_prepare(sql, options, || self.driver.prepare(sql, options))?;
            *cache_hit = Some(hit);
            self.driver.execute(&stmt, params)
        })
    }

    fn run_compiled(&self, operation: Operation, query: CompiledQuery) -> DbResult<D::Rows> {
        self.run(Some(operation), &query.sql, &query.params, &DriverOptions::new())
    }

    /// Set the isolation level of the next transaction.
    ///
    /// Returns `false` without contacting the database if `level` is not one
    /// of `READ UNCOMMITTED`, `READ COMMITTED`, `REPEATABLE READ`,
    /// `SERIALIZABLE`; otherwise whether the statement succeeded. Use
    /// [`apply_isolation_level`](Self::apply_isolation_level) to get the
    /// driver error instead.
    pub fn set_isolation_level(&self, level: &str) -> bool {
        match level.parse::<IsolationLevel>() {
            Ok(level) => self.apply_isolation_level(level).is_ok(),
            Err(_) => false,
        }
    }

    /// Issue `SET TRANSACTION ISOLATION LEVEL <level>`.
    pub fn apply_isolation_level(&self, level: IsolationLevel) -> DbResult<()> {
        let sql = level.set_transaction_sql();
        let ctx = || QueryContext::new(Dialect::Mysql, &sql, 0);
        self.hooks.observe(ctx, |_| self.driver.exec(&sql))
    }

    /// Let the database generate a UUID (`SELECT UUID()`).
    pub fn create_uuid(&self) -> DbResult<Uuid> {
        let mut rows = self.execute("SELECT UUID()", &Params::new())?;
        let value = rows
            .next_scalar()?
            .ok_or_else(|| DbError::decode("SELECT UUID() returned no rows"))?;
        uuid_from_value(value)
    }
}

fn uuid_from_value(value: Value) -> DbResult<Uuid> {
    match value {
        Value::Uuid(uuid) => Ok(uuid),
        Value::Text(text) => {
            Uuid::parse_str(&text).map_err(|e| DbError::decode(format!("UUID(): {e}")))
        }
        Value::Bytes(bytes) => {
            let text = std::str::from_utf8(&bytes)
                .map_err(|e| DbError::decode(format!("UUID(): {e}")))?;
            Uuid::parse_str(text).map_err(|e| DbError::decode(format!("UUID(): {e}")))
        }
        other => Err(DbError::decode(format!(
            "UUID(): expected text column, got {other}"
        ))),
    }
}

impl<D: Driver> Adapter for MysqlAdapter<D> {
    type Rows = D::Rows;

    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn supports(&self, _operation: Operation) -> bool {
        true
    }

    fn update(
        &self,
        table: &str,
        values: &Fields,
        where_: &Fields,
        allow_empty_where: bool,
    ) -> DbResult<D::Rows> {
        adapter::guard_where(Operation::Update, where_, allow_empty_where)?;
        adapter::guard_values(Operation::Update, values)?;
        let query = self.compiler.update(table, values, where_);
        self.run_compiled(Operation::Update, query)
    }

    fn insert(&self, table: &str, values: &Fields) -> DbResult<D::Rows> {
        adapter::guard_values(Operation::Insert, values)?;
        let query = self.compiler.insert(table, values);
        self.run_compiled(Operation::Insert, query)
    }

    fn select(&self, table: &str, where_: &Fields) -> DbResult<D::Rows> {
        let query = self.compiler.select(table, where_);
        self.run_compiled(Operation::Select, query)
    }

    fn delete(&self, table: &str, where_: &Fields, allow_empty_where: bool) -> DbResult<D::Rows> {
        adapter::guard_where(Operation::Delete, where_, allow_empty_where)?;
        let query = self.compiler.delete(table, where_);
        self.run_compiled(Operation::Delete, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_from_text_and_bytes() {
        let text = "9b2f6c3e-4a1d-11ef-8e2b-0242ac120002";
        let expected = Uuid::parse_str(text).unwrap();
        assert_eq!(uuid_from_value(Value::from(text)).unwrap(), expected);
        assert_eq!(
            uuid_from_value(Value::Bytes(text.as_bytes().to_vec())).unwrap(),
            expected
        );
        assert_eq!(uuid_from_value(Value::Uuid(expected)).unwrap(), expected);
    }

    #[test]
    fn uuid_from_wrong_type_is_decode_error() {
        let err = uuid_from_value(Value::Int(1)).unwrap_err();
        assert!(matches!(err, DbError::Decode(_)));
        assert!(uuid_from_value(Value::from("not-a-uuid")).is_err());
    }
}
