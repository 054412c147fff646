use std::collections::HashMap;
use std::sync::Arc;

use crate::types::DbValue;

use super::row::{Record, index_columns};

/// Rows returned by a reader call, fully materialized.
///
/// Column names are stored once and shared by every [`Record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    records: Vec<Record>,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
}

impl ResultSet {
    /// Create an empty result set for the given columns.
    #[must_use]
    pub fn new(column_names: Vec<String>) -> Self {
        Self::with_capacity(column_names, 0)
    }

    #[must_use]
    pub fn with_capacity(column_names: Vec<String>, capacity: usize) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self {
            records: Vec::with_capacity(capacity),
            column_names: Arc::new(column_names),
            column_index,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Add a row; `values` must follow the order of [`ResultSet::column_names`].
    pub fn add_row_values(&mut self, values: Vec<DbValue>) {
        self.records.push(Record::with_index(
            Arc::clone(&self.column_names),
            values,
            Arc::clone(&self.column_index),
        ));
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_share_column_metadata() {
        let mut rs = ResultSet::with_capacity(vec!["a".into(), "b".into()], 2);
        rs.add_row_values(vec![DbValue::Int(1), DbValue::Text("x".into())]);
        rs.add_row_values(vec![DbValue::Int(2), DbValue::Null]);

        assert_eq!(rs.len(), 2);
        assert_eq!(rs.column_names(), ["a", "b"]);
        let second = &rs.records()[1];
        assert_eq!(second.get("a"), Some(&DbValue::Int(2)));
        assert_eq!(second.get("b"), Some(&DbValue::Null));
        assert_eq!(rs.first().and_then(|r| r.get("b")), Some(&DbValue::Text("x".into())));
    }

    #[test]
    fn empty_result_keeps_columns() {
        let rs = ResultSet::new(vec!["id".into()]);
        assert!(rs.is_empty());
        assert_eq!(rs.column_names(), ["id"]);
        assert_eq!(rs.into_iter().count(), 0);
    }
}
