#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use sql_fluent::prelude::*;
use tempfile::tempdir;

fn unique_db_path(prefix: &str) -> String {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(format!("{prefix}.db"));
    // Leak the tempdir so the file persists for the duration of the test binary.
    std::mem::forget(dir);
    path.to_string_lossy().into_owned()
}

fn users_executor(prefix: &str) -> Result<QueryExecutor, SqlFluentError> {
    let exec = QueryExecutor::new(ConnectionOptions::new(unique_db_path(prefix)));
    let ddl = TableBuilder::new("users")
        .add_column(
            "id",
            ColumnType::Integer,
            Constraint::PrimaryKey | Constraint::AutoIncrement,
        )
        .add_column("name", ColumnType::Text, Constraint::NotNull)
        .add_column("age", ColumnType::Integer, Constraints::none())
        .add_column("active", ColumnType::Boolean, Constraints::none())
        .build();
    exec.execute_batch(&ddl)?;

    let insert = "INSERT INTO users (name, age, active) VALUES (@name, @age, @active)";
    for (name, age, active) in [
        ("alice", Some(30_i64), true),
        ("bob", None, false),
        ("carol", Some(30), true),
    ] {
        let params = QueryParams::from_pairs([
            ("@name", DbValue::from(name)),
            ("@age", DbValue::from(age)),
            ("@active", DbValue::from(active)),
        ]);
        assert_eq!(exec.execute_non_query(insert, Some(&params))?, 1);
    }
    Ok(exec)
}

#[test]
fn built_select_runs_with_named_parameters() -> Result<(), Box<dyn std::error::Error>> {
    let exec = users_executor("select")?;

    let query = SelectBuilder::new()
        .select(["id", "name"])
        .from("users")
        .where_eq("age", 30)
        .where_eq("active", true)
        .order_by_desc("name")
        .build()?;
    let rows = exec.execute_query(&query)?;

    assert_eq!(rows.column_names(), ["id", "name"]);
    let names: Vec<&str> = rows
        .iter()
        .filter_map(|r| r.get("name").and_then(DbValue::as_text))
        .collect();
    assert_eq!(names, ["carol", "alice"]);
    Ok(())
}

#[test]
fn repeated_column_filters_are_anded() -> Result<(), Box<dyn std::error::Error>> {
    let exec = users_executor("repeat")?;

    let query = SelectBuilder::new()
        .from("users")
        .where_eq("name", "alice")
        .where_eq("name", "bob")
        .build()?;
    assert!(exec.execute_query(&query)?.is_empty());

    let query = SelectBuilder::new()
        .from("users")
        .where_eq("age", 30)
        .where_eq("age", 30)
        .limit(1)
        .build()?;
    assert_eq!(exec.execute_query(&query)?.len(), 1);
    Ok(())
}

#[test]
fn database_null_is_an_explicit_value() -> Result<(), Box<dyn std::error::Error>> {
    let exec = users_executor("nulls")?;

    let query = SelectBuilder::new()
        .from("users")
        .where_eq("name", "bob")
        .build()?;
    let rows = exec.execute_query(&query)?;
    let bob = rows.first().expect("bob row");

    assert_eq!(bob.get("age"), Some(&DbValue::Null));
    assert_eq!(bob.get("no_such_column"), None);
    assert_eq!(bob.get("active").and_then(DbValue::as_bool), Some(false));
    assert_eq!(
        bob.column_names(),
        ["id", "name", "age", "active"]
    );
    Ok(())
}

#[test]
fn scalar_modes() -> Result<(), Box<dyn std::error::Error>> {
    let exec = users_executor("scalar")?;

    assert_eq!(
        exec.execute_scalar("SELECT COUNT(*) FROM users", None)?,
        DbValue::Int(3)
    );
    let params = QueryParams::from_pairs([("@name", "bob")]);
    assert_eq!(
        exec.execute_scalar("SELECT age FROM users WHERE name = @name", Some(&params))?,
        DbValue::Null
    );
    let params = QueryParams::from_pairs([("@name", "nobody")]);
    assert_eq!(
        exec.execute_scalar("SELECT age FROM users WHERE name = @name", Some(&params))?,
        DbValue::Null
    );
    Ok(())
}

#[test]
fn non_query_reports_rows_affected() -> Result<(), Box<dyn std::error::Error>> {
    let exec = users_executor("update")?;

    let params = QueryParams::from_pairs([("@age", 31_i64), ("@old", 30_i64)]);
    let affected =
        exec.execute_non_query("UPDATE users SET age = @age WHERE age = @old", Some(&params))?;
    assert_eq!(affected, 2);
    Ok(())
}

#[test]
fn timestamps_and_json_bind_as_text() -> Result<(), Box<dyn std::error::Error>> {
    let exec = QueryExecutor::new(ConnectionOptions::new(unique_db_path("text_types")));
    exec.execute_batch("CREATE TABLE events (at DATETIME, payload TEXT);")?;

    let at = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    let params = QueryParams::from_pairs([
        ("@at", DbValue::Timestamp(at)),
        ("@payload", DbValue::Json(serde_json::json!({"k": [1, 2]}))),
    ]);
    exec.execute_non_query(
        "INSERT INTO events (at, payload) VALUES (@at, @payload)",
        Some(&params),
    )?;

    let rows = exec.execute_query(&SelectBuilder::new().from("events").build()?)?;
    let row = rows.first().expect("event row");
    assert_eq!(row.get("at").and_then(DbValue::as_timestamp), Some(at));
    assert_eq!(
        row.get("payload").and_then(DbValue::as_text),
        Some(r#"{"k":[1,2]}"#)
    );
    Ok(())
}

#[test]
fn driver_errors_propagate_unchanged() {
    let exec = QueryExecutor::new(ConnectionOptions::new(unique_db_path("errors")));
    let query = SelectBuilder::new().from("missing_table").build().unwrap();
    let err = exec.execute_query(&query).unwrap_err();
    assert!(matches!(err, SqlFluentError::SqliteError(_)));
    assert!(err.to_string().contains("missing_table"));
}

#[test]
fn missing_connection_string_fails_before_io() {
    let exec = QueryExecutor::new(ConnectionOptions::default());
    let err = exec.execute_scalar("SELECT 1", None).unwrap_err();
    assert!(matches!(err, SqlFluentError::ConfigError(_)));
    let err = exec.execute_batch("SELECT 1").unwrap_err();
    assert!(matches!(err, SqlFluentError::ConfigError(_)));
}

#[test]
fn record_serializes_to_json() -> Result<(), Box<dyn std::error::Error>> {
    let exec = users_executor("json")?;
    let query = SelectBuilder::new()
        .select(["name", "age"])
        .from("users")
        .where_eq("name", "bob")
        .build()?;
    let rows = exec.execute_query(&query)?;
    assert_eq!(
        rows.first().map(Record::to_json),
        Some(serde_json::json!({"name": "bob", "age": null}))
    );
    Ok(())
}
