use std::time::Duration;

use crate::error::SqlFluentError;

/// Options for opening a connection.
///
/// The connection string is handed to the driver untouched: a file path,
/// `:memory:`, or a `file:` URI for `SQLite`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub connection_string: Option<String>,
    pub busy_timeout: Option<Duration>,
}

impl ConnectionOptions {
    #[must_use]
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: Some(connection_string.into()),
            busy_timeout: None,
        }
    }

    #[must_use]
    pub fn builder() -> ConnectionOptionsBuilder {
        ConnectionOptionsBuilder::default()
    }

    /// The configured connection string.
    ///
    /// # Errors
    /// Returns `SqlFluentError::ConfigError` if no connection string is set or it is blank.
    pub fn connection_string(&self) -> Result<&str, SqlFluentError> {
        match self.connection_string.as_deref() {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(SqlFluentError::ConfigError(
                "connection string is not set".into(),
            )),
        }
    }
}

/// Fluent builder for connection options.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptionsBuilder {
    opts: ConnectionOptions,
}

impl ConnectionOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.opts.connection_string = Some(connection_string.into());
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn finish(self) -> ConnectionOptions {
        self.opts
    }
}
