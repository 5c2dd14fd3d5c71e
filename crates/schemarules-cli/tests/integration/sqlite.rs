//! SQLite integration tests for the schemarules CLI.
//!
//! These tests create temporary SQLite databases and run the CLI against them.

use rusqlite::Connection;
use std::fs;
use tempfile::tempdir;

use crate::{assert_rules, json_rules, run_cli, run_cli_success};

/// Create a test SQLite database with sample tables.
fn create_test_db(path: &std::path::Path) {
    let conn = Connection::open(path).expect("open sqlite db");

    conn.execute_batch(
        r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE orders (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id),
            reference VARCHAR(32) NOT NULL,
            total REAL NOT NULL,
            note TEXT,
            shipped BOOLEAN NOT NULL DEFAULT 0,
            created_at DATETIME,
            updated_at DATETIME
        );
        "#,
    )
    .expect("create test tables");
}

fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}", path.display())
}

#[test]
fn test_sqlite_json_rules() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    create_test_db(&db_path);

    let output = run_cli_success(&[
        "orders",
        "--database-url",
        &sqlite_url(&db_path),
        "--format",
        "json",
    ]);

    let rules = json_rules(&output);
    assert_eq!(rules.len(), 5, "unexpected columns: {rules:?}");
    assert_rules(&rules, "user_id", &["required", "exists:users,id"]);
    assert_rules(&rules, "reference", &["required", "string", "min:1", "max:32"]);
    assert_rules(&rules, "total", &["required", "numeric"]);
    assert_rules(&rules, "note", &["nullable", "string", "min:1"]);
    assert_rules(&rules, "shipped", &["required", "boolean"]);
}

#[test]
fn test_sqlite_php_output_with_header() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    create_test_db(&db_path);

    let output = run_cli_success(&[
        "users",
        "--database-url",
        &sqlite_url(&db_path),
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stdout,
        "[\n    'name' => ['required', 'string', 'min:1'],\n]\n"
    );
    assert!(stderr.contains("Schema-based validation rules for table \"users\" have been generated!"));
}

#[test]
fn test_sqlite_unknown_table() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    create_test_db(&db_path);

    let output = run_cli(&["invoices", "--database-url", &sqlite_url(&db_path)]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(stderr.contains("Table 'invoices' not found!"), "stderr: {stderr}");
}

#[test]
fn test_sqlite_unknown_columns() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    create_test_db(&db_path);

    let output = run_cli(&[
        "orders",
        "--database-url",
        &sqlite_url(&db_path),
        "--columns",
        "note,sku,weight",
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(
        stderr.contains("The following columns do not exist on the table 'orders': sku, weight"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_sqlite_create_request() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    create_test_db(&db_path);
    let base = dir.path().join("project");

    let args = [
        "orders",
        "--database-url",
        &sqlite_url(&db_path),
        "--columns",
        "reference,note",
        "-c",
        "--base-path",
        base.to_str().unwrap(),
    ];
    let output = run_cli_success(&args);

    let request_path = base.join("app/Http/Requests/StoreOrderRequest.php");
    let content = fs::read_to_string(&request_path).expect("request class written");
    assert!(content.contains("class StoreOrderRequest extends FormRequest"));
    assert!(content.contains("'reference' => ['required', 'string', 'min:1', 'max:32'],"));
    assert!(content.contains("'note' => ['nullable', 'string', 'min:1'],"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("created successfully"), "stderr: {stderr}");

    // A second run without --force leaves the file alone
    let output = run_cli(&args);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&request_path).unwrap(), content);
}

#[test]
fn test_sqlite_skip_columns_from_env() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    create_test_db(&db_path);

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_schemarules"))
        .args(["orders", "--format", "json", "-q"])
        .env("DATABASE_URL", sqlite_url(&db_path))
        .env("SCHEMA_RULES_SKIP_COLUMNS", "note, shipped")
        .env("SCHEMA_RULES_STRING_MIN_LENGTH", "3")
        .output()
        .expect("run CLI");

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Schema-based"));
    let rules = json_rules(&output);
    assert!(!rules.contains_key("note"));
    assert!(!rules.contains_key("shipped"));
    assert_rules(&rules, "reference", &["required", "string", "min:3", "max:32"]);
}
