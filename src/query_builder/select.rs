use crate::error::SqlFluentError;
use crate::params::QueryParams;
use crate::types::DbValue;

use super::{BuiltQuery, SortDirection};

/// Builder for a single `SELECT` statement.
///
/// Each method consumes the builder and returns it, so a builder has exactly one
/// owner at a time; clone it explicitly to branch. Identifiers are written into the
/// SQL as given (no quoting), while values only ever travel as named parameters.
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    table: Option<String>,
    columns: Vec<String>,
    predicates: Vec<String>,
    order: Option<(String, SortDirection)>,
    limit: Option<u64>,
    params: QueryParams,
}

impl SelectBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append columns to the projection. Names are neither deduplicated nor validated.
    #[must_use]
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Reset the projection to `*`, dropping any columns selected so far.
    #[must_use]
    pub fn select_all(mut self) -> Self {
        self.columns.clear();
        self
    }

    #[must_use]
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add `column = @column_n`, ANDed with earlier predicates.
    ///
    /// `n` is the number of predicates added before this one, so filtering the same
    /// column twice yields two distinct placeholders.
    #[must_use]
    pub fn where_eq(mut self, column: &str, value: impl Into<DbValue>) -> Self {
        let placeholder = format!("@{column}_{}", self.predicates.len());
        self.predicates.push(format!("{column} = {placeholder}"));
        self.params.insert(placeholder, value);
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    #[must_use]
    pub fn order_by_asc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortDirection::Ascending)
    }

    #[must_use]
    pub fn order_by_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortDirection::Descending)
    }

    #[must_use]
    pub fn limit(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }

    /// Render the statement and snapshot its parameters.
    ///
    /// # Errors
    /// Returns `SqlFluentError::ConfigError` if no table was set with [`SelectBuilder::from`].
    pub fn build(&self) -> Result<BuiltQuery, SqlFluentError> {
        let table = self.table.as_deref().ok_or_else(|| {
            SqlFluentError::ConfigError("SELECT requires a table; call from() before build()".into())
        })?;

        let projection = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut sql = format!("SELECT {projection} FROM {table}");
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        }
        if let Some((column, direction)) = &self.order {
            sql.push_str(&format!(" ORDER BY {column} {}", direction.as_sql()));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        Ok(BuiltQuery::new(sql, self.params.clone()))
    }
}
