use crate::config::ConnectionOptions;
use crate::error::SqlFluentError;
use crate::params::QueryParams;
use crate::query_builder::BuiltQuery;
use crate::results::ResultSet;
use crate::sqlite::{AsyncSqliteConnection, NamedParams, SqliteConnection};
use crate::types::DbValue;

/// Runs SQL text with named parameters against a database described by
/// [`ConnectionOptions`].
///
/// Every call opens its own connection and closes it before returning, on success
/// and on error alike. Nothing is pooled, retried, or wrapped in a transaction.
///
/// ```rust
/// use sql_fluent::prelude::*;
///
/// let exec = QueryExecutor::new(ConnectionOptions::new(":memory:"));
/// let two = exec.execute_scalar("SELECT 1 + @one", Some(&QueryParams::from_pairs([("@one", 1_i64)])))?;
/// assert_eq!(two, DbValue::Int(2));
/// # Ok::<(), SqlFluentError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    options: ConnectionOptions,
}

impl QueryExecutor {
    #[must_use]
    pub fn new(options: ConnectionOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    fn connect(&self) -> Result<SqliteConnection, SqlFluentError> {
        SqliteConnection::open(&self.options)
    }

    async fn connect_async(&self) -> Result<AsyncSqliteConnection, SqlFluentError> {
        AsyncSqliteConnection::open(&self.options).await
    }

    /// Execute a statement and return the number of rows affected.
    ///
    /// # Errors
    /// Returns `ConfigError` if no connection string is configured, otherwise the
    /// driver error unchanged.
    pub fn execute_non_query(
        &self,
        sql: &str,
        params: Option<&QueryParams>,
    ) -> Result<usize, SqlFluentError> {
        let params = command_params(sql, params, "non-query");
        self.connect()?.execute_non_query(sql, &params)
    }

    /// Execute a query and return the first column of the first row.
    ///
    /// Both "no rows" and a database NULL come back as [`DbValue::Null`].
    ///
    /// # Errors
    /// Returns `ConfigError` if no connection string is configured, otherwise the
    /// driver error unchanged.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: Option<&QueryParams>,
    ) -> Result<DbValue, SqlFluentError> {
        let params = command_params(sql, params, "scalar");
        self.connect()?.execute_scalar(sql, &params)
    }

    /// Execute a query and eagerly materialize every row.
    ///
    /// # Errors
    /// Returns `ConfigError` if no connection string is configured, otherwise the
    /// driver error unchanged.
    pub fn execute_reader(
        &self,
        sql: &str,
        params: Option<&QueryParams>,
    ) -> Result<ResultSet, SqlFluentError> {
        let params = command_params(sql, params, "reader");
        self.connect()?.execute_reader(sql, &params)
    }

    /// Run a built `SELECT` through [`QueryExecutor::execute_reader`].
    ///
    /// # Errors
    /// Same as [`QueryExecutor::execute_reader`].
    pub fn execute_query(&self, query: &BuiltQuery) -> Result<ResultSet, SqlFluentError> {
        self.execute_reader(query.sql(), Some(query.params()))
    }

    /// Execute several `;`-separated statements without parameters, e.g. DDL scripts.
    ///
    /// # Errors
    /// Returns `ConfigError` if no connection string is configured, otherwise the
    /// driver error from the first failing statement.
    pub fn execute_batch(&self, sql: &str) -> Result<(), SqlFluentError> {
        tracing::debug!(sql, "executing batch");
        self.connect()?.execute_batch(sql)
    }

    /// Async variant of [`QueryExecutor::execute_non_query`].
    ///
    /// # Errors
    /// Same as the blocking variant, plus `ConnectionError`/`ExecutionError` if a
    /// blocking task cannot be joined.
    pub async fn execute_non_query_async(
        &self,
        sql: &str,
        params: Option<&QueryParams>,
    ) -> Result<usize, SqlFluentError> {
        let params = command_params(sql, params, "non-query");
        self.connect_async()
            .await?
            .execute_non_query(sql, params)
            .await
    }

    /// Async variant of [`QueryExecutor::execute_scalar`].
    ///
    /// # Errors
    /// Same as the blocking variant, plus `ConnectionError`/`ExecutionError` if a
    /// blocking task cannot be joined.
    pub async fn execute_scalar_async(
        &self,
        sql: &str,
        params: Option<&QueryParams>,
    ) -> Result<DbValue, SqlFluentError> {
        let params = command_params(sql, params, "scalar");
        self.connect_async().await?.execute_scalar(sql, params).await
    }

    /// Async variant of [`QueryExecutor::execute_reader`].
    ///
    /// # Errors
    /// Same as the blocking variant, plus `ConnectionError`/`ExecutionError` if a
    /// blocking task cannot be joined.
    pub async fn execute_reader_async(
        &self,
        sql: &str,
        params: Option<&QueryParams>,
    ) -> Result<ResultSet, SqlFluentError> {
        let params = command_params(sql, params, "reader");
        self.connect_async().await?.execute_reader(sql, params).await
    }

    /// Async variant of [`QueryExecutor::execute_query`].
    ///
    /// # Errors
    /// Same as [`QueryExecutor::execute_reader_async`].
    pub async fn execute_query_async(
        &self,
        query: &BuiltQuery,
    ) -> Result<ResultSet, SqlFluentError> {
        self.execute_reader_async(query.sql(), Some(query.params()))
            .await
    }

    /// Async variant of [`QueryExecutor::execute_batch`].
    ///
    /// # Errors
    /// Same as the blocking variant, plus `ConnectionError`/`ExecutionError` if a
    /// blocking task cannot be joined.
    pub async fn execute_batch_async(&self, sql: &str) -> Result<(), SqlFluentError> {
        tracing::debug!(sql, "executing batch");
        self.connect_async().await?.execute_batch(sql).await
    }
}

/// Shared command construction: values are converted for binding, never logged.
fn command_params(sql: &str, params: Option<&QueryParams>, mode: &str) -> NamedParams {
    let named = NamedParams::convert(params);
    tracing::debug!(sql, params = named.len(), mode, "executing command");
    named
}
