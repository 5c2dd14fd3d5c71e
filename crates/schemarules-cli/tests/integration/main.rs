//! Integration tests for the schemarules CLI with real databases.
//!
//! These tests are behind the `integration-tests` feature flag and won't run
//! with regular `cargo test`:
//!
//! ```bash
//! cargo test -p schemarules-cli --features integration-tests
//! ```
//!
//! SQLite tests use temporary files. MySQL and PostgreSQL tests read their
//! connection URLs from `TEST_MYSQL_URL` and `TEST_POSTGRES_URL` and expect the
//! fixture tables from [`FIXTURE_TABLE`] to exist.

#![cfg(feature = "integration-tests")]

mod mysql;
mod postgres;
mod sqlite;

use std::process::{Command, Output};

/// Table every live-database fixture defines.
pub const FIXTURE_TABLE: &str = "schemarules_posts";

/// Run the schemarules CLI with the given arguments and return the output.
pub fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schemarules"))
        .args(args)
        .env_remove("DATABASE_URL")
        .output()
        .expect("failed to execute schemarules CLI")
}

/// Run the schemarules CLI and assert it succeeds.
pub fn run_cli_success(args: &[&str]) -> Output {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "CLI failed with status {:?}\nstderr: {}\nstdout: {}",
            output.status.code(),
            stderr,
            stdout
        );
    }
    output
}

/// Parses JSON output into `column -> rule tokens`.
pub fn json_rules(output: &Output) -> serde_json::Map<String, serde_json::Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON output, but parsing failed: {}\nOutput was: {}",
            e, stdout
        )
    });
    json.as_object()
        .cloned()
        .unwrap_or_else(|| panic!("Expected a JSON object, got: {stdout}"))
}

/// Asserts the exact rule tokens for one column.
pub fn assert_rules(
    rules: &serde_json::Map<String, serde_json::Value>,
    column: &str,
    expected: &[&str],
) {
    let actual: Vec<&str> = rules
        .get(column)
        .and_then(|value| value.as_array())
        .unwrap_or_else(|| panic!("no rules for '{column}' in {rules:?}"))
        .iter()
        .filter_map(|token| token.as_str())
        .collect();
    assert_eq!(actual, expected, "rules for '{column}'");
}
