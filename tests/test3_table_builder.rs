#![cfg(feature = "sqlite")]

use sql_fluent::prelude::*;
use tempfile::tempdir;

fn unique_db_path(prefix: &str) -> String {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(format!("{prefix}.db"));
    std::mem::forget(dir);
    path.to_string_lossy().into_owned()
}

#[test]
fn every_column_type_is_accepted_by_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let exec = QueryExecutor::new(ConnectionOptions::new(unique_db_path("all_types")));
    let columns = [
        ColumnType::Integer,
        ColumnType::Text,
        ColumnType::Varchar,
        ColumnType::Boolean,
        ColumnType::DateTime,
        ColumnType::Decimal,
        ColumnType::Float,
        ColumnType::Double,
        ColumnType::Blob,
    ];
    let table = columns
        .iter()
        .enumerate()
        .fold(TableBuilder::new("everything"), |t, (i, ty)| {
            t.add_column(format!("c{i}"), *ty, Constraints::none())
        });
    let ddl = table.build();
    exec.execute_batch(&ddl)?;
    // IF NOT EXISTS makes re-running the DDL a no-op
    exec.execute_batch(&ddl)?;

    let info = exec.execute_reader("SELECT name, type FROM pragma_table_info('everything')", None)?;
    let declared: Vec<String> = info
        .iter()
        .filter_map(|r| r.get("type").and_then(DbValue::as_text).map(str::to_string))
        .collect();
    let expected: Vec<String> = columns.iter().map(|c| c.sql_keyword().to_string()).collect();
    assert_eq!(declared, expected);
    Ok(())
}

#[test]
fn constraints_are_enforced_after_creation() -> Result<(), Box<dyn std::error::Error>> {
    let exec = QueryExecutor::new(ConnectionOptions::new(unique_db_path("constraints")));
    let ddl = TableBuilder::new("accounts")
        .add_column(
            "id",
            ColumnType::Integer,
            Constraint::AutoIncrement | Constraint::PrimaryKey,
        )
        .add_column("email", ColumnType::Text, Constraint::Unique | Constraint::NotNull)
        .build();
    assert!(ddl.contains("    id INTEGER PRIMARY KEY AUTOINCREMENT,\n"));
    assert!(ddl.contains("    email TEXT NOT NULL UNIQUE\n"));
    exec.execute_batch(&ddl)?;

    let insert = "INSERT INTO accounts (email) VALUES (@email)";
    let params = QueryParams::from_pairs([("@email", "a@example.com")]);
    exec.execute_non_query(insert, Some(&params))?;

    let dup = exec.execute_non_query(insert, Some(&params)).unwrap_err();
    assert!(matches!(dup, SqlFluentError::SqliteError(_)));

    let null_email = QueryParams::from_pairs([("@email", None::<String>)]);
    let err = exec.execute_non_query(insert, Some(&null_email)).unwrap_err();
    assert!(matches!(err, SqlFluentError::SqliteError(_)));

    assert_eq!(
        exec.execute_scalar("SELECT MAX(id) FROM accounts", None)?,
        DbValue::Int(1)
    );
    Ok(())
}
