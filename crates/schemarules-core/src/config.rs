//! Configuration for rule generation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Columns that never receive rules, regardless of configuration.
pub const DEFAULT_SKIP_COLUMNS: [&str; 3] = ["created_at", "updated_at", "deleted_at"];

/// Settings read by the classifier and the table rule generator.
///
/// Passed explicitly into every call; nothing reads ambient global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Treat `tinyint(1)` columns as booleans instead of integers (default: true).
    #[serde(default = "default_tinyint1_to_bool")]
    pub tinyint1_to_bool: bool,

    /// Minimum length emitted for every string rule (default: 1).
    #[serde(default = "default_string_min_length")]
    pub string_min_length: u64,

    /// Additional column names to exclude, on top of [`DEFAULT_SKIP_COLUMNS`].
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub skip_columns: BTreeSet<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            tinyint1_to_bool: default_tinyint1_to_bool(),
            string_min_length: default_string_min_length(),
            skip_columns: BTreeSet::new(),
        }
    }
}

fn default_tinyint1_to_bool() -> bool {
    true
}

fn default_string_min_length() -> u64 {
    1
}

impl RulesConfig {
    /// Parses a JSON configuration document, filling omitted keys with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds column names to the configured skip list.
    pub fn with_skip_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Returns true if the column is in the built-in or configured skip list.
    pub fn is_skipped(&self, column: &str) -> bool {
        DEFAULT_SKIP_COLUMNS.contains(&column) || self.skip_columns.contains(column)
    }
}
