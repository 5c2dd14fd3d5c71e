//! MySQL / MariaDB type rules.
//!
//! Matches on `COLUMN_TYPE` (`varchar(100)`, `int unsigned`, `enum('a','b')`).

use super::bounds::IntegerBoundsTable;
use super::{
    boolean_tokens, classify_with, date_tokens, integer_tokens, json_tokens, membership_tokens,
    numeric_tokens, string_tokens, timestamp_tokens, year_tokens, TypeContext, TypeRule,
};
use crate::config::RulesConfig;
use crate::types::{ColumnDescriptor, RuleSet, RuleToken};

const CHAR_TYPES: &[&str] = &["char", "varchar", "nchar", "nvarchar"];
const TEXT_TYPES: &[&str] = &["tinytext", "text", "mediumtext", "longtext"];
const INTEGER_TYPES: &[&str] = &["tinyint", "smallint", "mediumint", "int", "integer", "bigint"];
const NUMERIC_TYPES: &[&str] = &[
    "decimal",
    "dec",
    "numeric",
    "fixed",
    "float",
    "double",
    "double precision",
    "real",
];
const MEMBERSHIP_TYPES: &[&str] = &["enum", "set"];
const DATE_TYPES: &[&str] = &["date", "time", "datetime"];

const RULES: &[TypeRule] = &[
    TypeRule {
        name: "tinyint1_boolean",
        matches: is_tinyint1_boolean,
        build: boolean_tokens,
    },
    TypeRule {
        name: "char",
        matches: |ctx| ctx.ty.is_any(CHAR_TYPES),
        build: char_tokens,
    },
    TypeRule {
        name: "text",
        matches: |ctx| ctx.ty.is_any(TEXT_TYPES),
        build: |ctx| string_tokens(ctx.config, None),
    },
    TypeRule {
        name: "integer",
        matches: |ctx| ctx.ty.is_any(INTEGER_TYPES),
        build: |ctx| {
            integer_tokens(IntegerBoundsTable::mysql().lookup(ctx.ty.base(), ctx.ty.signedness()))
        },
    },
    TypeRule {
        name: "numeric",
        matches: |ctx| ctx.ty.is_any(NUMERIC_TYPES),
        build: numeric_tokens,
    },
    TypeRule {
        name: "enum_set",
        matches: |ctx| ctx.ty.is_any(MEMBERSHIP_TYPES),
        build: |ctx| membership_tokens(ctx.ty.quoted_literals()),
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
    TypeRule {
        name: "json",
        matches: |ctx| ctx.ty.base() == "json",
        build: json_tokens,
    },
];

/// Classifies a column described by MySQL's `information_schema.COLUMNS`.
pub fn classify(column: &ColumnDescriptor, config: &RulesConfig) -> RuleSet {
    classify_with(RULES, column, config)
}

/// Exactly `tinyint(1)`: the storage MySQL uses for `BOOLEAN`.
fn is_tinyint1_boolean(ctx: &TypeContext<'_>) -> bool {
    ctx.config.tinyint1_to_bool
        && ctx.ty.base() == "tinyint"
        && ctx.ty.params() == Some("1")
        && !ctx.ty.is_unsigned()
}

/// Prefers the catalog's `CHARACTER_MAXIMUM_LENGTH`, falling back to the
/// declared width in the type string.
fn char_tokens(ctx: &TypeContext<'_>) -> Vec<RuleToken> {
    let max_length = ctx.column.character_max_length.or_else(|| ctx.ty.length());
    string_tokens(ctx.config, max_length)
}
