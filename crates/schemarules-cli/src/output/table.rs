//! Human-readable table output formatting.

use schemarules_core::TableRules;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Format the rules as a two-column table: column name and `|`-joined rules.
pub fn format_table(rules: &TableRules) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Column", "Rules"]);
    for (column, set) in rules {
        builder.push_record([column.clone(), set.to_strings().join("|")]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}
