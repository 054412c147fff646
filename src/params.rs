use std::collections::HashMap;
use std::collections::hash_map;

use crate::types::DbValue;

/// Named parameters handed to the executor alongside the SQL text.
///
/// Names are the placeholder tokens as they appear in the SQL (for example
/// `@id_0`). The mapping is unordered; inserting a name twice keeps the last value:
/// ```rust
/// use sql_fluent::prelude::*;
///
/// let params = QueryParams::from_pairs([("@id", DbValue::Int(1)), ("@id", DbValue::Int(2))]);
/// assert_eq!(params.len(), 1);
/// assert_eq!(params.get("@id"), Some(&DbValue::Int(2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    values: HashMap<String, DbValue>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from discrete `(name, value)` pairs, last write wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DbValue>,
    {
        pairs.into_iter().collect()
    }

    /// Insert or overwrite a parameter, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<DbValue>) -> Option<DbValue> {
        self.values.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DbValue> {
        self.values.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, DbValue> {
        self.values.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<DbValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<DbValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a DbValue);
    type IntoIter = hash_map::Iter<'a, String, DbValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_duplicates_overwrite_earlier_ones() {
        let params = QueryParams::from_pairs([
            ("@a", DbValue::Int(1)),
            ("@b", DbValue::Text("x".into())),
            ("@a", DbValue::Int(3)),
        ]);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("@a"), Some(&DbValue::Int(3)));
        assert_eq!(params.get("@b"), Some(&DbValue::Text("x".into())));
    }

    #[test]
    fn none_becomes_explicit_null() {
        let params = QueryParams::from_pairs([("@deleted_at", None::<String>)]);
        assert!(params.contains("@deleted_at"));
        assert_eq!(params.get("@deleted_at"), Some(&DbValue::Null));
        assert_eq!(params.get("@missing"), None);
    }

    #[test]
    fn insert_reports_replaced_value() {
        let mut params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.insert("@x", 1_i64), None);
        assert_eq!(params.insert("@x", 2_i64), Some(DbValue::Int(1)));
        assert_eq!(params.iter().count(), 1);
    }
}
