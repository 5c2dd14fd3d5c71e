//! PHP short-array output, ready to paste into a validator or form request.

use schemarules_core::TableRules;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Formats the rules as a PHP array literal, one column per line:
///
/// ```text
/// [
///     'title' => ['nullable', 'string', 'min:1', 'max:100'],
/// ]
/// ```
pub fn format_php(rules: &TableRules) -> String {
    if rules.is_empty() {
        return "[]".to_string();
    }

    let mut out = String::from("[\n");
    for (column, set) in rules {
        let tokens: Vec<String> = set.iter().map(|token| quote(&token.to_string())).collect();
        let _ = writeln!(out, "{INDENT}{} => [{}],", quote(column), tokens.join(", "));
    }
    out.push(']');
    out
}

/// Single-quoted PHP string literal.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
