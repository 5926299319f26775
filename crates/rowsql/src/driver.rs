//! Execution facade: the raw driver the adapters sit on.
//!
//! rowsql never talks to a database itself. Implement [`Driver`] over the
//! native client of your choice; the adapters only need to prepare a
//! statement once and execute it any number of times with fresh parameters.

use crate::error::DbResult;
use crate::params::{DriverOptions, Params};
use crate::value::Value;

/// A native database connection.
pub trait Driver {
    /// Prepared statement handle. Reused across executions.
    type Statement;
    /// Result handle returned by an execution.
    type Rows: ResultSet;

    /// Compile `sql` once for later repeated execution.
    fn prepare(&self, sql: &str, options: &DriverOptions) -> DbResult<Self::Statement>;

    /// Bind named `params` (names without the leading `:`) and run `statement`.
    fn execute(&self, statement: &Self::Statement, params: &Params) -> DbResult<Self::Rows>;

    /// Run a parameterless statement without going through a statement cache.
    ///
    /// The default implementation prepares and executes in one go.
    fn exec(&self, sql: &str) -> DbResult<()> {
        let statement = self.prepare(sql, &DriverOptions::new())?;
        self.execute(&statement, &Params::new()).map(|_| ())
    }
}

/// Row access on an executed statement.
pub trait ResultSet {
    /// Fetch the next row as positional column values.
    fn next_row(&mut self) -> DbResult<Option<Vec<Value>>>;

    /// Rows affected by a mutation, when the driver reports it.
    fn affected_rows(&self) -> Option<u64> {
        None
    }

    /// First column of the next row, if any.
    fn next_scalar(&mut self) -> DbResult<Option<Value>> {
        Ok(self.next_row()?.and_then(|row| row.into_iter().next()))
    }
}

impl<D: Driver + ?Sized> Driver for &D {
    type Statement = D::Statement;
    type Rows = D::Rows;

    fn prepare(&self, sql: &str, options: &DriverOptions) -> DbResult<Self::Statement> {
        (**self).prepare(sql, options)
    }

    fn execute(&self, statement: &Self::Statement, params: &Params) -> DbResult<Self::Rows> {
        (**self).execute(statement, params)
    }

    fn exec(&self, sql: &str) -> DbResult<()> {
        (**self).exec(sql)
    }
}
