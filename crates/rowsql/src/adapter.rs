//! Dialect adapter capability interface.
//!
//! Both adapters expose the same four row operations. An adapter that does
//! not implement one returns [`DbError::Unsupported`](crate::DbError::Unsupported)
//! instead of degrading, and [`Adapter::supports`] answers up front so callers
//! can branch on capability without attempting the call.

use crate::error::DbResult;
use crate::fields::Fields;
use std::fmt;

/// SQL dialects with a shipped adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Mysql,
    Sqlite,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Mysql => "MySQL",
            Dialect::Sqlite => "SQLite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Update,
    Insert,
    Select,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Update,
        Operation::Insert,
        Operation::Select,
        Operation::Delete,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Operation::Update => "UPDATE",
            Operation::Insert => "INSERT",
            Operation::Select => "SELECT",
            Operation::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Mapping-based row operations against a single table.
///
/// `where_` mappings are AND-joined. `update` and `delete` refuse an empty
/// `where_` unless `allow_empty_where` is set; the check is purely syntactic,
/// so a literal tautology such as `literal("1")` still passes it.
pub trait Adapter {
    /// Driver result handle returned by every operation.
    type Rows;

    fn dialect(&self) -> Dialect;

    /// Whether `operation` is implemented by this adapter.
    fn supports(&self, operation: Operation) -> bool;

    /// Update rows matching `where_`.
    fn update(
        &self,
        table: &str,
        values: &Fields,
        where_: &Fields,
        allow_empty_where: bool,
    ) -> DbResult<Self::Rows>;

    /// Insert a new row.
    fn insert(&self, table: &str, values: &Fields) -> DbResult<Self::Rows>;

    /// Select all columns of rows matching `where_`.
    fn select(&self, table: &str, where_: &Fields) -> DbResult<Self::Rows>;

    /// Delete rows matching `where_`.
    fn delete(&self, table: &str, where_: &Fields, allow_empty_where: bool)
    -> DbResult<Self::Rows>;
}

/// Reject an empty WHERE mapping unless explicitly allowed.
pub(crate) fn guard_where(
    operation: Operation,
    where_: &Fields,
    allow_empty_where: bool,
) -> DbResult<()> {
    if !allow_empty_where && where_.is_empty() {
        return Err(crate::DbError::EmptyWhereNotAllowed { operation });
    }
    Ok(())
}

/// Reject UPDATE/INSERT without values.
pub(crate) fn guard_values(operation: Operation, values: &Fields) -> DbResult<()> {
    if values.is_empty() {
        return Err(crate::DbError::EmptyValues { operation });
    }
    Ok(())
}
