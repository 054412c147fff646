//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types so a single
//! `use sql_fluent::prelude::*;` is enough to build and run queries.

pub use crate::config::{ConnectionOptions, ConnectionOptionsBuilder};
pub use crate::error::SqlFluentError;
pub use crate::params::QueryParams;
pub use crate::query_builder::{BuiltQuery, SelectBuilder, SortDirection};
pub use crate::results::{Record, ResultSet};
pub use crate::schema::{ColumnDef, ColumnType, Constraint, Constraints, TableBuilder};
pub use crate::types::DbValue;

#[cfg(feature = "sqlite")]
pub use crate::executor::QueryExecutor;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::{AsyncSqliteConnection, SqliteConnection};
