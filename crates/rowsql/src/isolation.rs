//! Transaction isolation levels.

use crate::error::DbError;
use std::fmt;
use std::str::FromStr;

/// SQL standard isolation levels accepted by `SET TRANSACTION ISOLATION LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    pub const ALL: [IsolationLevel; 4] = [
        IsolationLevel::ReadUncommitted,
        IsolationLevel::ReadCommitted,
        IsolationLevel::RepeatableRead,
        IsolationLevel::Serializable,
    ];

    pub fn as_sql(self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            IsolationLevel::ReadCommitted => "READ COMMITTED",
            IsolationLevel::RepeatableRead => "REPEATABLE READ",
            IsolationLevel::Serializable => "SERIALIZABLE",
        }
    }

    /// The statement that applies this level to the next transaction.
    pub fn set_transaction_sql(self) -> String {
        format!("SET TRANSACTION ISOLATION LEVEL {}", self.as_sql())
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for IsolationLevel {
    type Err = DbError;

    /// Matches the SQL spelling, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_sql().eq_ignore_ascii_case(s))
            .ok_or_else(|| DbError::InvalidIsolationLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_level() {
        for level in IsolationLevel::ALL {
            assert_eq!(level.as_sql().parse::<IsolationLevel>().unwrap(), level);
        }
        assert_eq!(
            "repeatable read".parse::<IsolationLevel>().unwrap(),
            IsolationLevel::RepeatableRead
        );
    }

    #[test]
    fn rejects_unknown_levels() {
        for bad in ["", "READ UNCOMMITED", "SNAPSHOT", "SERIALIZABLE; DROP TABLE t"] {
            let err = bad.parse::<IsolationLevel>().unwrap_err();
            assert!(matches!(err, DbError::InvalidIsolationLevel(_)));
        }
    }

    #[test]
    fn renders_statement() {
        assert_eq!(
            IsolationLevel::ReadCommitted.set_transaction_sql(),
            "SET TRANSACTION ISOLATION LEVEL READ COMMITTED"
        );
    }
}
