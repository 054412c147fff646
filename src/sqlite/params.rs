use std::fmt::Write;

use rusqlite::ToSql;
use rusqlite::types::Value;

use crate::params::QueryParams;
use crate::types::DbValue;

/// Convert a single `DbValue` to a rusqlite `Value`.
///
/// `SQLite` has no boolean, timestamp, or JSON storage class: booleans bind as
/// `0`/`1`, timestamps as `%F %T%.f` text, JSON as its serialized text.
#[must_use]
pub fn db_value_to_sqlite_value(value: &DbValue) -> Value {
    match value {
        DbValue::Int(i) => Value::Integer(*i),
        DbValue::Float(f) => Value::Real(*f),
        DbValue::Text(s) => Value::Text(s.clone()),
        DbValue::Bool(b) => Value::Integer(i64::from(*b)),
        DbValue::Timestamp(dt) => {
            let mut buf = String::with_capacity(32);
            // writing into a String cannot fail
            let _ = write!(buf, "{}", dt.format("%F %T%.f"));
            Value::Text(buf)
        }
        DbValue::Json(jval) => Value::Text(jval.to_string()),
        DbValue::Blob(bytes) => Value::Blob(bytes.clone()),
        DbValue::Null => Value::Null,
    }
}

/// Convert a rusqlite `Value` read from a row back into a `DbValue`.
#[must_use]
pub fn sqlite_value_to_db_value(value: Value) -> DbValue {
    match value {
        Value::Null => DbValue::Null,
        Value::Integer(i) => DbValue::Int(i),
        Value::Real(f) => DbValue::Float(f),
        Value::Text(s) => DbValue::Text(s),
        Value::Blob(b) => DbValue::Blob(b),
    }
}

/// Owned named parameters, ready to bind to a prepared statement.
///
/// Owned so they can be moved onto the blocking pool for async calls.
#[derive(Debug, Clone, Default)]
pub struct NamedParams(pub Vec<(String, Value)>);

impl NamedParams {
    /// Convert the executor's parameter mapping into `SQLite` values.
    #[must_use]
    pub fn convert(params: Option<&QueryParams>) -> Self {
        let Some(params) = params else {
            return Self::default();
        };
        NamedParams(
            params
                .iter()
                .map(|(name, value)| (name.clone(), db_value_to_sqlite_value(value)))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow as the `(name, value)` slice rusqlite binds by name.
    #[must_use]
    pub fn as_named_refs(&self) -> Vec<(&str, &dyn ToSql)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }
}
