use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ConnectionOptions;
use crate::error::SqlFluentError;
use crate::results::ResultSet;
use crate::types::DbValue;

use super::params::NamedParams;
use super::query::{build_result_set, execute_statement, query_scalar};

type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

fn open_raw(opts: &ConnectionOptions) -> Result<rusqlite::Connection, SqlFluentError> {
    let connection_string = opts.connection_string()?;
    tracing::debug!(connection_string, "opening sqlite connection");
    let conn = rusqlite::Connection::open(connection_string)?;
    if let Some(timeout) = opts.busy_timeout {
        conn.busy_timeout(timeout)?;
    }
    Ok(conn)
}

/// Blocking `SQLite` connection. Closed when dropped.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    /// Open a connection on the current thread.
    ///
    /// # Errors
    /// Returns `SqlFluentError::ConfigError` if no connection string is set, or the
    /// driver error if the database cannot be opened.
    pub fn open(opts: &ConnectionOptions) -> Result<Self, SqlFluentError> {
        Ok(Self {
            conn: open_raw(opts)?,
        })
    }

    /// Execute a statement and return rows affected.
    ///
    /// # Errors
    /// Returns the driver error if preparing or executing the statement fails.
    pub fn execute_non_query(&self, query: &str, params: &NamedParams) -> Result<usize, SqlFluentError> {
        let mut stmt = self.conn.prepare(query)?;
        execute_statement(&mut stmt, params)
    }

    /// Execute a query and return the first column of the first row.
    ///
    /// # Errors
    /// Returns the driver error if preparing or executing the query fails.
    pub fn execute_scalar(&self, query: &str, params: &NamedParams) -> Result<DbValue, SqlFluentError> {
        let mut stmt = self.conn.prepare(query)?;
        query_scalar(&mut stmt, params)
    }

    /// Execute a query and materialize every row.
    ///
    /// # Errors
    /// Returns the driver error if preparing, executing, or reading the query fails.
    pub fn execute_reader(&self, query: &str, params: &NamedParams) -> Result<ResultSet, SqlFluentError> {
        let mut stmt = self.conn.prepare(query)?;
        build_result_set(&mut stmt, params)
    }

    /// Execute several `;`-separated statements without parameters.
    ///
    /// # Errors
    /// Returns the driver error from the first failing statement.
    pub fn execute_batch(&self, query: &str) -> Result<(), SqlFluentError> {
        Ok(self.conn.execute_batch(query)?)
    }

    /// Borrow the underlying rusqlite connection.
    #[must_use]
    pub fn raw(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.conn.path())
            .finish()
    }
}

/// `SQLite` connection whose open and every command run on tokio's blocking pool.
///
/// The connection is already open once [`AsyncSqliteConnection::open`] resolves,
/// and is closed when the last handle is dropped.
#[derive(Clone)]
pub struct AsyncSqliteConnection {
    conn: SharedSqliteConnection,
}

impl AsyncSqliteConnection {
    /// Open a connection without blocking the async runtime.
    ///
    /// # Errors
    /// Returns `SqlFluentError::ConfigError` if no connection string is set (before any
    /// I/O), the driver error if opening fails, or `ConnectionError` if the blocking
    /// task could not be joined.
    pub async fn open(opts: &ConnectionOptions) -> Result<Self, SqlFluentError> {
        opts.connection_string()?;
        let opts = opts.clone();
        let conn = tokio::task::spawn_blocking(move || open_raw(&opts))
            .await
            .map_err(|e| {
                SqlFluentError::ConnectionError(format!("sqlite open join error: {e}"))
            })??;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run synchronous `rusqlite` logic against the connection on the blocking pool.
    ///
    /// # Errors
    /// Propagates the callback's error, or `ExecutionError` if the task could not be joined.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, SqlFluentError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlFluentError> + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(Arc::clone(&self.conn), func).await
    }

    /// # Errors
    /// Returns the driver error if preparing or executing the statement fails.
    pub async fn execute_non_query(
        &self,
        query: &str,
        params: NamedParams,
    ) -> Result<usize, SqlFluentError> {
        let sql_owned = query.to_owned();
        self.with_connection(move |guard| {
            let mut stmt = guard.prepare(&sql_owned)?;
            execute_statement(&mut stmt, &params)
        })
        .await
    }

    /// # Errors
    /// Returns the driver error if preparing or executing the query fails.
    pub async fn execute_scalar(
        &self,
        query: &str,
        params: NamedParams,
    ) -> Result<DbValue, SqlFluentError> {
        let sql_owned = query.to_owned();
        self.with_connection(move |guard| {
            let mut stmt = guard.prepare(&sql_owned)?;
            query_scalar(&mut stmt, &params)
        })
        .await
    }

    /// # Errors
    /// Returns the driver error if preparing, executing, or reading the query fails.
    pub async fn execute_reader(
        &self,
        query: &str,
        params: NamedParams,
    ) -> Result<ResultSet, SqlFluentError> {
        let sql_owned = query.to_owned();
        self.with_connection(move |guard| {
            let mut stmt = guard.prepare(&sql_owned)?;
            build_result_set(&mut stmt, &params)
        })
        .await
    }

    /// # Errors
    /// Returns the driver error from the first failing statement.
    pub async fn execute_batch(&self, query: &str) -> Result<(), SqlFluentError> {
        let sql_owned = query.to_owned();
        self.with_connection(move |guard| Ok(guard.execute_batch(&sql_owned)?))
            .await
    }
}

impl fmt::Debug for AsyncSqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSqliteConnection").finish_non_exhaustive()
    }
}

async fn run_blocking<F, R>(conn: SharedSqliteConnection, func: F) -> Result<R, SqlFluentError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlFluentError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| SqlFluentError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}
