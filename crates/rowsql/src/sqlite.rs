//! Partial-capability SQLite adapter.
//!
//! Only `update` is implemented, through its own minimal statement builder:
//! every column is quoted, every comparison is `=`, every value is bound and
//! all placeholders are `:value_N` from one counter. Literals, custom
//! operators and raw column tokens are refused with
//! [`DbError::UnsupportedValue`]. `insert`, `select` and `delete` return
//! [`DbError::Unsupported`].
//!
//! There is no statement cache: every call prepares through the driver.

use crate::adapter::{self, Adapter, Dialect, Operation};
use crate::compile::CompiledQuery;
use crate::config::AdapterConfig;
use crate::driver::Driver;
use crate::error::{DbError, DbResult};
use crate::fields::{Column, Fields};
use crate::ident::Quoting;
use crate::monitor::{Hooks, QueryContext};
use crate::params::{DriverOptions, Params};
use crate::wrap::Wrapped;

/// SQLite adapter over a raw [`Driver`].
#[derive(Debug)]
pub struct SqliteAdapter<D> {
    driver: D,
    hooks: Hooks,
}

impl<D: Driver> SqliteAdapter<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, AdapterConfig::default())
    }

    /// Only `hooks` is taken from `config`; quoting is always backticks and
    /// nothing is cached.
    pub fn with_config(driver: D, config: AdapterConfig) -> Self {
        Self {
            driver,
            hooks: Hooks::new(config.hooks),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Prepare and execute `sql` with `params`.
    pub fn execute(&self, sql: &str, params: &Params) -> DbResult<D::Rows> {
        self.run(None, sql, params)
    }

    fn run(&self, operation: Option<Operation>, sql: &str, params: &Params) -> DbResult<D::Rows> {
        let ctx =
            || QueryContext::new(Dialect::Sqlite, sql, params.len()).with_operation(operation);
        self.hooks.observe(ctx, |cache_hit| {
            let stmt = self.driver.prepare(sql, &DriverOptions::new())?;
            *cache_hit = Some(false);
            self.driver.execute(&stmt, params)
        })
    }

    fn unsupported<T>(operation: Operation) -> DbResult<T> {
        Err(DbError::Unsupported {
            dialect: Dialect::Sqlite,
            operation,
        })
    }
}

/// Build `UPDATE` with plain `=` bindings only.
pub fn build_update(table: &str, values: &Fields, where_: &Fields) -> DbResult<CompiledQuery> {
    let quoting = Quoting::Backtick;
    let mut params = Params::new();
    let mut v = 0usize;

    let mut bind = |fields: &Fields| -> DbResult<Vec<String>> {
        let mut parts = Vec::with_capacity(fields.len());
        for (column, value) in fields {
            let Column::Name(name) = column else {
                return Err(unsupported_value("raw column tokens"));
            };
            let value = match value {
                Wrapped::Plain(value) => value,
                Wrapped::Literal(_) => return Err(unsupported_value("literal values")),
                Wrapped::Operator(_) => return Err(unsupported_value("custom operators")),
            };
            let key = format!("value_{v}");
            v += 1;
            parts.push(format!("{} = :{key}", quoting.quote(name)));
            params.bind(key, value.clone());
        }
        Ok(parts)
    };

    let set = bind(values)?;
    let conditions = bind(where_)?;

    let mut sql = format!("UPDATE {} SET {}", quoting.quote(table), set.join(", "));
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    Ok(CompiledQuery { sql, params })
}

fn unsupported_value(feature: &'static str) -> DbError {
    DbError::UnsupportedValue {
        dialect: Dialect::Sqlite,
        feature,
    }
}

impl<D: Driver> Adapter for SqliteAdapter<D> {
    type Rows = D::Rows;

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn supports(&self, operation: Operation) -> bool {
        operation == Operation::Update
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
        let query = build_update(table, values, where_)?;
        self.run(Some(Operation::Update), &query.sql, &query.params)
    }

    fn insert(&self, _table: &str, _values: &Fields) -> DbResult<D::Rows> {
        Self::unsupported(Operation::Insert)
    }

    fn select(&self, _table: &str, _where: &Fields) -> DbResult<D::Rows> {
        Self::unsupported(Operation::Select)
    }

    fn delete(
        &self,
        _table: &str,
        _where: &Fields,
        _allow_empty_where: bool,
    ) -> DbResult<D::Rows> {
        Self::unsupported(Operation::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::value::Value;
    use crate::wrap::{literal, op};

    #[test]
    fn update_uses_value_prefix_for_both_clauses() {
        let q = build_update("foobar", &fields! { "foo" => "bar" }, &fields! { "foo" => "baz" })
            .unwrap();
        assert_eq!(
            q.sql,
            "UPDATE `foobar` SET `foo` = :value_0 WHERE `foo` = :value_1"
        );
        assert_eq!(q.params.get("value_0"), Some(&Value::from("bar")));
        assert_eq!(q.params.get("value_1"), Some(&Value::from("baz")));
    }

    #[test]
    fn update_without_where_has_no_where_clause() {
        let q = build_update("t", &fields! { "a" => 1, "b" => 2 }, &fields! {}).unwrap();
        assert_eq!(q.sql, "UPDATE `t` SET `a` = :value_0, `b` = :value_1");
    }

    #[test]
    fn refuses_literals_operators_and_raw_columns() {
        let cases = [
            (fields! { "a" => literal("NOW()") }, "literal values"),
            (fields! { "a" => op("!=", 1) }, "custom operators"),
            (fields! { literal("a + 1") => 1 }, "raw column tokens"),
        ];
        for (values, expected) in cases {
            let err = build_update("t", &values, &fields! { "id" => 1 }).unwrap_err();
            match err {
                DbError::UnsupportedValue { dialect, feature } => {
                    assert_eq!(dialect, Dialect::Sqlite);
                    assert_eq!(feature, expected);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
