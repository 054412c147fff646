//! Fluent SQL helpers: a `SELECT` builder with named parameters, a
//! `CREATE TABLE IF NOT EXISTS` builder, and a blocking/async executor over
//! `rusqlite`.
//!
//! ```rust
//! use sql_fluent::prelude::*;
//!
//! let exec = QueryExecutor::new(ConnectionOptions::new(":memory:"));
//! let query = SelectBuilder::new()
//!     .select(["name"])
//!     .from("sqlite_master")
//!     .where_eq("type", "table")
//!     .build()?;
//! let rows = exec.execute_query(&query)?;
//! assert!(rows.is_empty());
//! # Ok::<(), SqlFluentError>(())
//! ```

pub mod prelude;

pub mod config;
pub mod error;
pub mod params;
pub mod query_builder;
pub mod results;
pub mod schema;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod executor;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use config::{ConnectionOptions, ConnectionOptionsBuilder};
pub use error::SqlFluentError;
pub use params::QueryParams;
pub use query_builder::{BuiltQuery, SelectBuilder, SortDirection};
pub use results::{Record, ResultSet};
pub use schema::{ColumnDef, ColumnType, Constraint, Constraints, TableBuilder};
pub use types::DbValue;

#[cfg(feature = "sqlite")]
pub use executor::QueryExecutor;
