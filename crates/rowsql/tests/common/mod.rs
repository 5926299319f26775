#![allow(dead_code)]

use rowsql::{DbError, DbResult, Driver, DriverOptions, Params, ResultSet, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A driver call, as observed by [`RecordingDriver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Prepare { sql: String, options: DriverOptions },
    Execute { statement: usize, params: Params },
    Exec { sql: String },
}

#[derive(Debug)]
pub struct Statement {
    pub id: usize,
    pub sql: String,
}

/// Echoes what was executed, plus any canned rows.
#[derive(Debug)]
pub struct Rows {
    pub sql: String,
    pub params: Params,
    rows: VecDeque<Vec<Value>>,
}

impl ResultSet for Rows {
    fn next_row(&mut self) -> DbResult<Option<Vec<Value>>> {
        Ok(self.rows.pop_front())
    }
}

/// In-memory driver that records every call and never touches a database.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    calls: Mutex<Vec<Call>>,
    prepared: Mutex<usize>,
    canned_rows: Mutex<Vec<Vec<Value>>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned by the next execution.
    pub fn returning(self, rows: Vec<Vec<Value>>) -> Self {
        *self.canned_rows.lock().unwrap() = rows;
        self
    }

    /// Make every subsequent call fail with a driver error.
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prepare_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Prepare { .. }))
            .count()
    }

    pub fn exec_sql(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Exec { sql } => Some(sql),
                _ => None,
            })
            .collect()
    }

    fn check_failure(&self) -> DbResult<()> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(DbError::driver(message.clone())),
            None => Ok(()),
        }
    }
}

impl Driver for RecordingDriver {
    type Statement = Statement;
    type Rows = Rows;

    fn prepare(&self, sql: &str, options: &DriverOptions) -> DbResult<Statement> {
        self.calls.lock().unwrap().push(Call::Prepare {
            sql: sql.to_string(),
            options: options.clone(),
        });
        self.check_failure()?;
        let mut prepared = self.prepared.lock().unwrap();
        *prepared += 1;
        Ok(Statement {
            id: *prepared,
            sql: sql.to_string(),
        })
    }

    fn execute(&self, statement: &Statement, params: &Params) -> DbResult<Rows> {
        self.calls.lock().unwrap().push(Call::Execute {
            statement: statement.id,
            params: params.clone(),
        });
        self.check_failure()?;
        Ok(Rows {
            sql: statement.sql.clone(),
            params: params.clone(),
            rows: std::mem::take(&mut *self.canned_rows.lock().unwrap()).into(),
        })
    }

    fn exec(&self, sql: &str) -> DbResult<()> {
        self.calls.lock().unwrap().push(Call::Exec {
            sql: sql.to_string(),
        });
        self.check_failure()
    }
}
