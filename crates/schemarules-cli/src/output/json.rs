//! JSON output formatting.

use anyhow::{Context, Result};
use schemarules_core::TableRules;

/// Format the rules as a JSON object in column order.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json(rules: &TableRules, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(rules)
    } else {
        serde_json::to_string_pretty(rules)
    };
    json.context("Failed to serialize rules as JSON")
}
