use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::types::DbValue;

/// One row of a result set.
///
/// Values keep the column order reported by the driver. A database NULL is stored
/// as [`DbValue::Null`], so `get` returns `Some(&DbValue::Null)` for a null column
/// and `None` only when the column does not exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    column_names: Arc<Vec<String>>,
    values: Vec<DbValue>,
    // shared with every row of the same result set
    column_index: Arc<HashMap<String, usize>>,
}

impl Record {
    /// Create a record with its own column lookup table.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<DbValue>) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self::with_index(column_names, values, column_index)
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        values: Vec<DbValue>,
        column_index: Arc<HashMap<String, usize>>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Get a value from the row by column name
    ///
    /// # Returns
    ///
    /// The value at the column, or None if the column wasn't found
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&DbValue> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&DbValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn contains(&self, column_name: &str) -> bool {
        self.column_index.contains_key(column_name)
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn values(&self) -> &[DbValue] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column, value)` pairs in result-set order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DbValue)> + '_ {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Render the row as a JSON object keyed by column name.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let object: Map<String, JsonValue> = self
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect();
        JsonValue::Object(object)
    }
}

/// First occurrence wins when a result set repeats a column name.
pub(crate) fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        index.entry(name.clone()).or_insert(i);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record::new(
            Arc::new(vec!["id".into(), "name".into(), "id".into()]),
            vec![DbValue::Int(1), DbValue::Null, DbValue::Int(2)],
        )
    }

    #[test]
    fn null_is_distinct_from_missing() {
        let row = record();
        assert_eq!(row.get("name"), Some(&DbValue::Null));
        assert!(row.contains("name"));
        assert_eq!(row.get("email"), None);
        assert!(!row.contains("email"));
    }

    #[test]
    fn duplicate_column_names_resolve_to_first() {
        let row = record();
        assert_eq!(row.get("id"), Some(&DbValue::Int(1)));
        assert_eq!(row.get_by_index(2), Some(&DbValue::Int(2)));
    }

    #[test]
    fn iteration_keeps_native_order() {
        let row = record();
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["id", "name", "id"]);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn json_object_uses_null_for_db_null() {
        let row = Record::new(
            Arc::new(vec!["id".into(), "name".into()]),
            vec![DbValue::Int(7), DbValue::Null],
        );
        assert_eq!(row.to_json(), serde_json::json!({"id": 7, "name": null}));
    }
}
