//! `CREATE TABLE IF NOT EXISTS` rendering from column definitions.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SqlFluentError;

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Text,
    Varchar,
    Boolean,
    #[value(name = "datetime")]
    DateTime,
    Decimal,
    Float,
    Double,
    Blob,
}

impl ColumnType {
    /// SQL keyword emitted into DDL for this type.
    #[must_use]
    pub fn sql_keyword(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Varchar => "VARCHAR(255)",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Blob => "BLOB",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_keyword())
    }
}

impl FromStr for ColumnType {
    type Err = SqlFluentError;

    /// Accepts the type name or its SQL keyword, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INTEGER" => Ok(ColumnType::Integer),
            "TEXT" => Ok(ColumnType::Text),
            "VARCHAR" | "VARCHAR(255)" => Ok(ColumnType::Varchar),
            "BOOLEAN" => Ok(ColumnType::Boolean),
            "DATETIME" => Ok(ColumnType::DateTime),
            "DECIMAL" => Ok(ColumnType::Decimal),
            "FLOAT" => Ok(ColumnType::Float),
            "DOUBLE" => Ok(ColumnType::Double),
            "BLOB" => Ok(ColumnType::Blob),
            _ => Err(SqlFluentError::UnsupportedValue(format!(
                "unknown column type: {s}"
            ))),
        }
    }
}

/// A single column constraint. The derive order is the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    PrimaryKey,
    AutoIncrement,
    NotNull,
    Unique,
}

impl Constraint {
    #[must_use]
    pub fn sql_keyword(self) -> &'static str {
        match self {
            Constraint::PrimaryKey => "PRIMARY KEY",
            Constraint::AutoIncrement => "AUTOINCREMENT",
            Constraint::NotNull => "NOT NULL",
            Constraint::Unique => "UNIQUE",
        }
    }
}

/// Set of constraints on a column.
///
/// Combine with `|`; rendering order is fixed regardless of how the set was built:
/// ```rust
/// use sql_fluent::prelude::*;
///
/// let c = Constraint::NotNull | Constraint::PrimaryKey;
/// assert_eq!(c.to_string(), "PRIMARY KEY NOT NULL");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constraints(BTreeSet<Constraint>);

impl Constraints {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, constraint: Constraint) -> bool {
        self.0.contains(&constraint)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Constraint> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for constraint in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(constraint.sql_keyword())?;
            first = false;
        }
        Ok(())
    }
}

impl From<Constraint> for Constraints {
    fn from(constraint: Constraint) -> Self {
        Self(BTreeSet::from([constraint]))
    }
}

impl FromIterator<Constraint> for Constraints {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl BitOr for Constraint {
    type Output = Constraints;

    fn bitor(self, rhs: Constraint) -> Constraints {
        Constraints::from(self) | rhs
    }
}

impl BitOr<Constraint> for Constraints {
    type Output = Constraints;

    fn bitor(mut self, rhs: Constraint) -> Constraints {
        self.0.insert(rhs);
        self
    }
}

impl BitOr for Constraints {
    type Output = Constraints;

    fn bitor(mut self, rhs: Constraints) -> Constraints {
        self.0.extend(rhs.0);
        self
    }
}

/// One column of a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    #[serde(default)]
    pub constraints: Constraints,
}

impl ColumnDef {
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        constraints: impl Into<Constraints>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            constraints: constraints.into(),
        }
    }

    /// `<name> <TYPE>[ <constraints>]`
    #[must_use]
    pub fn render(&self) -> String {
        if self.constraints.is_empty() {
            format!("{} {}", self.name, self.column_type.sql_keyword())
        } else {
            format!(
                "{} {} {}",
                self.name,
                self.column_type.sql_keyword(),
                self.constraints
            )
        }
    }
}

/// Builder for `CREATE TABLE IF NOT EXISTS`.
///
/// Column names are not checked for duplicates or quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBuilder {
    name: String,
    columns: Vec<ColumnDef>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_column(
        self,
        name: impl Into<String>,
        column_type: ColumnType,
        constraints: impl Into<Constraints>,
    ) -> Self {
        self.add_column_def(ColumnDef::new(name, column_type, constraints))
    }

    #[must_use]
    pub fn add_column_def(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    #[must_use]
    pub fn build(&self) -> String {
        let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", self.name);
        let last = self.columns.len().saturating_sub(1);
        for (i, column) in self.columns.iter().enumerate() {
            sql.push_str("    ");
            sql.push_str(&column.render());
            if i < last {
                sql.push(',');
            }
            sql.push('\n');
        }
        sql.push_str(");\n");
        sql
    }
}
