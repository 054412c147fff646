use rusqlite::Statement;
use rusqlite::types::Value;

use crate::error::SqlFluentError;
use crate::results::ResultSet;
use crate::types::DbValue;

use super::params::{NamedParams, sqlite_value_to_db_value};

/// Extract a `DbValue` from a `SQLite` row.
///
/// # Errors
///
/// Returns `SqlFluentError` if the column index is out of range.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<DbValue, SqlFluentError> {
    let value: Value = row.get(idx)?;
    Ok(sqlite_value_to_db_value(value))
}

/// Run a statement and copy every column of every row into a `ResultSet`.
///
/// # Errors
/// Returns `SqlFluentError::SqliteError` if binding, stepping, or reading a column fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &NamedParams,
) -> Result<ResultSet, SqlFluentError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(column_names, 10);
    let mut rows_iter = stmt.query(&params.as_named_refs()[..])?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    tracing::trace!(rows = result_set.len(), "materialized result set");
    Ok(result_set)
}

/// First column of the first row, or `DbValue::Null` when there is none.
///
/// # Errors
/// Returns `SqlFluentError::SqliteError` if binding or stepping the statement fails.
pub fn query_scalar(stmt: &mut Statement, params: &NamedParams) -> Result<DbValue, SqlFluentError> {
    let has_columns = stmt.column_count() > 0;
    let mut rows_iter = stmt.query(&params.as_named_refs()[..])?;
    match rows_iter.next()? {
        Some(row) if has_columns => sqlite_extract_value_sync(row, 0),
        _ => Ok(DbValue::Null),
    }
}

/// Run a statement that returns no rows and report rows affected.
///
/// # Errors
/// Returns `SqlFluentError::SqliteError` if binding or executing the statement fails.
pub fn execute_statement(stmt: &mut Statement, params: &NamedParams) -> Result<usize, SqlFluentError> {
    Ok(stmt.execute(&params.as_named_refs()[..])?)
}
