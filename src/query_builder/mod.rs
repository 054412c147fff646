use std::fmt;

use crate::params::QueryParams;

mod select;

pub use select::SelectBuilder;

/// Direction of an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A rendered SQL string and the named parameters its placeholders refer to.
///
/// This is an owned snapshot: mutating the builder after `build()` does not
/// change a `BuiltQuery` that was already produced.
/// ```rust
/// use sql_fluent::prelude::*;
///
/// let query = SelectBuilder::new().from("users").where_eq("id", 5).build()?;
/// assert_eq!(query.sql(), "SELECT * FROM users WHERE id = @id_0");
/// assert_eq!(query.params().get("@id_0"), Some(&DbValue::Int(5)));
/// # Ok::<(), SqlFluentError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    sql: String,
    params: QueryParams,
}

impl BuiltQuery {
    pub(crate) fn new(sql: String, params: QueryParams) -> Self {
        Self { sql, params }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    #[must_use]
    pub fn into_parts(self) -> (String, QueryParams) {
        (self.sql, self.params)
    }
}

impl fmt::Display for BuiltQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
