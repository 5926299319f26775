//! # rowsql
//!
//! Mapping-based SQL statements over a raw database driver.
//!
//! ## Features
//!
//! - **Rows as mappings**: UPDATE/INSERT/SELECT/DELETE from ordered column → value maps
//! - **Named placeholders**: `:value_N` for SET, `:where_N` for WHERE, one shared counter
//! - **Escape hatches**: [`literal`] pastes raw SQL, [`op`] swaps `=` for another operator
//! - **Safe defaults**: UPDATE/DELETE refuse an empty WHERE unless explicitly allowed
//! - **Statement cache**: identical `(sql, options)` pairs reuse one prepared handle
//! - **Capability-typed dialects**: unsupported operations fail with a typed error
//!
//! ## Example
//!
//! ```ignore
//! use rowsql::{Adapter, MysqlAdapter, fields, literal, op};
//!
//! let db = MysqlAdapter::new(driver);
//!
//! // UPDATE `users` SET `name` = :value_0, `seen_at` = NOW() WHERE `id` = :where_1
//! db.update(
//!     "users",
//!     &fields! { "name" => "alice", "seen_at" => literal("NOW()") },
//!     &fields! { "id" => 42 },
//!     false,
//! )?;
//!
//! // SELECT * FROM `users` WHERE `age` >= :where_0
//! let rows = db.select("users", &fields! { "age" => op(">=", 18) })?;
//! ```

pub mod adapter;
pub mod cache;
pub mod compile;
pub mod config;
pub mod driver;
pub mod error;
pub mod fields;
pub mod ident;
pub mod isolation;
pub mod monitor;
pub mod mysql;
pub mod params;
pub mod sqlite;
pub mod value;
pub mod wrap;

pub use adapter::{Adapter, Dialect, Operation};
pub use cache::{Fingerprint, StatementCache, fingerprint};
pub use compile::{CompiledQuery, Compiler};
pub use config::{AdapterConfig, StatementCacheConfig};
pub use driver::{Driver, ResultSet};
pub use error::{BoxError, DbError, DbResult};
pub use fields::{Column, Fields};
pub use ident::Quoting;
pub use isolation::IsolationLevel;
pub use monitor::{QueryContext, QueryHook, QueryOutcome};
pub use mysql::MysqlAdapter;
pub use params::{DriverOptions, Params};
pub use sqlite::SqliteAdapter;
pub use value::Value;
pub use wrap::{Literal, Operand, OperatorValue, Wrapped, literal, op};

#[cfg(feature = "tracing")]
pub use monitor::TracingSqlHook;
