//! SQLite type rules.
//!
//! SQLite declared types are free-form and only advisory, so matching follows
//! the engine's own type-affinity rules (substring checks on the declared
//! name) and every integer shares one 64-bit range.

use super::bounds::GENERIC_64_BIT;
use super::{
    boolean_tokens, classify_with, date_tokens, integer_tokens, numeric_tokens, string_tokens,
    timestamp_tokens, year_tokens, TypeContext, TypeRule,
};
use crate::config::RulesConfig;
use crate::types::{ColumnDescriptor, RuleSet};

const NUMERIC_MARKERS: &[&str] = &["real", "floa", "doub", "numeric", "decimal"];
const DATE_TYPES: &[&str] = &["date", "time", "datetime"];

const RULES: &[TypeRule] = &[
    TypeRule {
        name: "boolean",
        matches: is_boolean,
        build: boolean_tokens,
    },
    TypeRule {
        name: "char",
        matches: |ctx| ctx.ty.base().contains("char"),
        build: |ctx| string_tokens(ctx.config, ctx.ty.length()),
    },
    TypeRule {
        name: "text",
        matches: |ctx| ctx.ty.base().contains("text") || ctx.ty.base() == "clob",
        build: |ctx| string_tokens(ctx.config, None),
    },
    TypeRule {
        // SQLite stores JSON as TEXT; there is no distinct declared length.
        name: "json",
        matches: |ctx| ctx.ty.base() == "json",
        build: |ctx| string_tokens(ctx.config, None),
    },
    TypeRule {
        name: "integer",
        matches: |ctx| ctx.ty.base().contains("int"),
        build: |_| integer_tokens(Some(GENERIC_64_BIT)),
    },
    TypeRule {
        name: "numeric",
        matches: |ctx| {
            NUMERIC_MARKERS
                .iter()
                .any(|marker| ctx.ty.base().contains(marker))
        },
        build: numeric_tokens,
    },
    TypeRule {
        name: "year",
        matches: |ctx| ctx.ty.base() == "year",
        build: year_tokens,
    },
    TypeRule {
        name: "date_time",
        matches: |ctx| ctx.ty.is_any(DATE_TYPES),
        build: date_tokens,
    },
    TypeRule {
        name: "timestamp",
        matches: |ctx| ctx.ty.base() == "timestamp",
        build: timestamp_tokens,
    },
];

/// Classifies a column described by `pragma_table_info`.
pub fn classify(column: &ColumnDescriptor, config: &RulesConfig) -> RuleSet {
    classify_with(RULES, column, config)
}

fn is_boolean(ctx: &TypeContext<'_>) -> bool {
    let base = ctx.ty.base();
    let tinyint1 = base == "tinyint" && ctx.ty.params() == Some("1") && !ctx.ty.is_unsigned();
    (tinyint1 && ctx.config.tinyint1_to_bool) || base == "boolean" || base == "bool"
}
