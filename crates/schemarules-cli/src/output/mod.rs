//! Output formatting modules.

pub mod json;
pub mod php;
pub mod table;

pub use json::format_json;
pub use php::format_php;
pub use table::format_table;

use crate::cli::OutputFormat;
use anyhow::Result;
use schemarules_core::TableRules;

/// Renders `rules` in the requested format.
pub fn render(rules: &TableRules, format: OutputFormat, compact: bool) -> Result<String> {
    Ok(match format {
        OutputFormat::Php => format_php(rules),
        OutputFormat::Json => format_json(rules, compact)?,
        OutputFormat::Table => format_table(rules),
    })
}
