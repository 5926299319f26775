//! Compiles field mappings into parameterized SQL.
//!
//! The compiler is stateless: every call starts a fresh placeholder counter
//! and returns a [`CompiledQuery`] without touching any driver.
//!
//! Placeholders are named after the clause they come from, `:value_N` in SET
//! and `:where_N` in WHERE, with one counter shared by both clauses. Literal
//! values consume no counter value.
//!
//! ```ignore
//! use rowsql::{Compiler, Operation, fields, op};
//!
//! let q = Compiler::default().compile(
//!     Operation::Update,
//!     "foobar",
//!     Some(&fields! { "foo" => "bar" }),
//!     Some(&fields! { "foo" => op("!=", "baz") }),
//! );
//! assert_eq!(q.sql, "UPDATE `foobar` SET `foo` = :value_0 WHERE `foo` != :where_1");
//! ```

use crate::adapter::Operation;
use crate::fields::{Column, Fields};
use crate::ident::Quoting;
use crate::params::Params;
use crate::wrap::Rhs;

/// Placeholder prefix for SET entries.
pub const SET_PREFIX: &str = "value_";
/// Placeholder prefix for WHERE entries.
pub const WHERE_PREFIX: &str = "where_";

/// SQL text plus the values for its named placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Params,
}

/// Query compiler for a given identifier quoting style.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    quoting: Quoting,
}

impl Compiler {
    pub fn new(quoting: Quoting) -> Self {
        Self { quoting }
    }

    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// Statement head for `operation` on `table`, e.g. ``UPDATE `t` ``.
    pub fn skeleton(&self, operation: Operation, table: &str) -> String {
        let head = match operation {
            Operation::Update => "UPDATE ",
            Operation::Insert => "INSERT INTO ",
            Operation::Select => "SELECT * FROM ",
            Operation::Delete => "DELETE FROM ",
        };
        let mut sql = String::with_capacity(head.len() + table.len() + 2);
        sql.push_str(head);
        self.quoting.write_quoted(&mut sql, table);
        sql
    }

    /// Compile `operation` on `table`.
    ///
    /// `set` and `where_` are emitted only when present and non-empty. Which
    /// one an operation uses is up to the caller: INSERT passes only `set`,
    /// SELECT/DELETE only `where_`.
    pub fn compile(
        &self,
        operation: Operation,
        table: &str,
        set: Option<&Fields>,
        where_: Option<&Fields>,
    ) -> CompiledQuery {
        let mut emitter = Emitter {
            quoting: self.quoting,
            sql: self.skeleton(operation, table),
            params: Params::new(),
            counter: 0,
        };

        if let Some(set) = set.filter(|f| !f.is_empty()) {
            emitter.sql.push_str(" SET ");
            emitter.clause(set, SET_PREFIX, ", ");
        }

        if let Some(where_) = where_.filter(|f| !f.is_empty()) {
            emitter.sql.push_str(" WHERE ");
            emitter.clause(where_, WHERE_PREFIX, " AND ");
        }

        CompiledQuery {
            sql: emitter.sql,
            params: emitter.params,
        }
    }

    pub fn update(&self, table: &str, values: &Fields, where_: &Fields) -> CompiledQuery {
        self.compile(Operation::Update, table, Some(values), Some(where_))
    }

    pub fn insert(&self, table: &str, values: &Fields) -> CompiledQuery {
        self.compile(Operation::Insert, table, Some(values), None)
    }

    pub fn select(&self, table: &str, where_: &Fields) -> CompiledQuery {
        self.compile(Operation::Select, table, None, Some(where_))
    }

    pub fn delete(&self, table: &str, where_: &Fields) -> CompiledQuery {
        self.compile(Operation::Delete, table, None, Some(where_))
    }
}

struct Emitter {
    quoting: Quoting,
    sql: String,
    params: Params,
    counter: usize,
}

impl Emitter {
    fn clause(&mut self, fields: &Fields, prefix: &str, separator: &str) {
        for (n, (column, value)) in fields.iter().enumerate() {
            if n > 0 {
                self.sql.push_str(separator);
            }

            match column {
                Column::Name(name) => self.quoting.write_quoted(&mut self.sql, name),
                Column::Raw(token) => self.sql.push_str(token.as_sql()),
            }

            let (operator, rhs) = value.classify();
            self.sql.push(' ');
            self.sql.push_str(operator);
            self.sql.push(' ');

            match rhs {
                Rhs::Raw(text) => self.sql.push_str(text),
                Rhs::Bind(v) => {
                    let name = format!("{prefix}{}", self.counter);
                    self.counter += 1;
                    self.sql.push(':');
                    self.sql.push_str(&name);
                    self.params.bind(name, v.clone());
                }
            }
        }
    }
}
