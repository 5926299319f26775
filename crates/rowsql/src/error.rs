//! Error types for rowsql

use crate::adapter::{Dialect, Operation};
use thiserror::Error;

/// Result type alias for rowsql operations
pub type DbResult<T> = Result<T, DbError>;

/// Boxed error produced by a [`Driver`](crate::driver::Driver) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum DbError {
    /// UPDATE/DELETE called without WHERE conditions and without opting in
    #[error("Empty where statements are not allowed for {operation}")]
    EmptyWhereNotAllowed { operation: Operation },

    /// UPDATE/INSERT called without any values to write
    #[error("{operation} requires at least one value")]
    EmptyValues { operation: Operation },

    /// Operation not implemented by this dialect adapter
    #[error("{operation} is not implemented for {dialect}")]
    Unsupported {
        dialect: Dialect,
        operation: Operation,
    },

    /// Value shape (literal, custom operator, raw column) not accepted by this dialect adapter
    #[error("{feature} are not supported by {dialect}")]
    UnsupportedValue {
        dialect: Dialect,
        feature: &'static str,
    },

    /// Isolation level outside of the SQL standard set
    #[error("Invalid isolation level: {0}")]
    InvalidIsolationLevel(String),

    /// Result row could not be interpreted
    #[error("Decode error: {0}")]
    Decode(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error surfaced by the underlying driver
    #[error("Driver error: {0}")]
    Driver(#[source] BoxError),
}

impl DbError {
    /// Wrap any driver-level error.
    pub fn driver(err: impl Into<BoxError>) -> Self {
        Self::Driver(err.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Whether the call was rejected before any SQL reached the database.
    ///
    /// These indicate a caller bug rather than a data or environment issue.
    pub fn is_guard_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyWhereNotAllowed { .. }
                | Self::EmptyValues { .. }
                | Self::InvalidIsolationLevel(_)
        )
    }

    /// Check if this is a capability error of the dialect adapter
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. } | Self::UnsupportedValue { .. })
    }

    /// Check if the error came from the underlying driver
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_and_driver_errors_are_distinguishable() {
        let guard = DbError::EmptyWhereNotAllowed {
            operation: Operation::Delete,
        };
        assert!(guard.is_guard_rejection());
        assert!(!guard.is_driver());

        let driver = DbError::driver("connection reset");
        assert!(driver.is_driver());
        assert!(!driver.is_guard_rejection());
        assert_eq!(driver.to_string(), "Driver error: connection reset");
    }

    #[test]
    fn unsupported_message_names_dialect_and_operation() {
        let err = DbError::Unsupported {
            dialect: Dialect::Sqlite,
            operation: Operation::Insert,
        };
        assert!(err.is_unsupported());
        assert_eq!(err.to_string(), "INSERT is not implemented for SQLite");
    }
}
