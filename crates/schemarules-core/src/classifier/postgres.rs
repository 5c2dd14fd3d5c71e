//! PostgreSQL type rules.
//!
//! Matches on `information_schema.columns.data_type` (`character varying`,
//! `timestamp with time zone`, ...), so widths never appear in the type string
//! and string lengths come from `character_maximum_length`.

use super::bounds::IntegerBoundsTable;
use super::{
    boolean_tokens, classify_with, date_tokens, integer_tokens, json_tokens, membership_tokens,
    numeric_tokens, string_tokens, timestamp_tokens, TypeContext, TypeRule,
};
use crate::config::RulesConfig;
use crate::types::{ColumnDescriptor, RuleSet};

const CHAR_TYPES: &[&str] = &["character varying", "character", "varchar", "char", "bpchar"];
const INTEGER_TYPES: &[&str] = &["smallint", "integer", "bigint"];
const NUMERIC_TYPES: &[&str] = &["numeric", "decimal", "real", "double precision"];
const JSON_TYPES: &[&str] = &["json", "jsonb"];

const RULES: &[TypeRule] = &[
    TypeRule {
        name: "boolean",
        matches: |ctx| ctx.ty.base() == "boolean",
        build: boolean_tokens,
    },
    TypeRule {
        name: "enum",
        matches: |ctx| ctx.column.enum_values.is_some(),
        build: |ctx| membership_tokens(ctx.column.enum_values.clone().unwrap_or_default()),
    },
    TypeRule {
        name: "char",
        matches: |ctx| ctx.ty.is_any(CHAR_TYPES),
        build: |ctx| string_tokens(ctx.config, ctx.column.character_max_length),
    },
    TypeRule {
        name: "text",
        matches: |ctx| ctx.ty.base() == "text",
        build: |ctx| string_tokens(ctx.config, None),
    },
    TypeRule {
        name: "integer",
        matches: |ctx| ctx.ty.is_any(INTEGER_TYPES),
        build: |ctx| {
            integer_tokens(IntegerBoundsTable::postgres().lookup(ctx.ty.base(), ctx.ty.signedness()))
        },
    },
    TypeRule {
        name: "numeric",
        matches: |ctx| ctx.ty.is_any(NUMERIC_TYPES),
        build: numeric_tokens,
    },
    TypeRule {
        name: "date_time",
        matches: is_date_or_time,
        build: date_tokens,
    },
    TypeRule {
        name: "timestamp",
        matches: |ctx| ctx.ty.base().starts_with("timestamp"),
        build: timestamp_tokens,
    },
    TypeRule {
        name: "json",
        matches: |ctx| ctx.ty.is_any(JSON_TYPES),
        build: json_tokens,
    },
];

/// Classifies a column described by PostgreSQL's `information_schema.columns`.
pub fn classify(column: &ColumnDescriptor, config: &RulesConfig) -> RuleSet {
    classify_with(RULES, column, config)
}

/// `date`, `time`, `time with time zone`, `time without time zone`.
fn is_date_or_time(ctx: &TypeContext<'_>) -> bool {
    let base = ctx.ty.base();
    base == "date" || base == "time" || base.starts_with("time ")
}
