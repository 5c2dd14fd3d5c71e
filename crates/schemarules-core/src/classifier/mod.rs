//! Column type classification into rule tokens.
//!
//! Every backend classifies with the same algorithm:
//!
//! 1. presence token (`required` / `nullable`);
//! 2. `exists:<table>,<column>` for foreign-key columns, and nothing else;
//! 3. otherwise the first [`TypeRule`] of the backend's ordered list whose
//!    predicate matches contributes its tokens. No match means no type tokens.
//!
//! The backend modules only differ in their rule lists and bounds tables.

pub mod bounds;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

use crate::config::RulesConfig;
use crate::types::{ColumnDescriptor, RuleSet, RuleToken};
use bounds::IntegerBounds;
use regex::Regex;
use std::sync::OnceLock;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Classifies one column: `(column, config) -> rules`.
pub type Classifier = fn(&ColumnDescriptor, &RulesConfig) -> RuleSet;

pub(crate) const YEAR_MIN: &str = "1901";
pub(crate) const YEAR_MAX: &str = "2155";
/// Signed 32-bit epoch range of MySQL's TIMESTAMP storage, applied to every
/// backend.
pub(crate) const TIMESTAMP_MIN: &str = "1970-01-01 00:00:01";
pub(crate) const TIMESTAMP_MAX: &str = "2038-01-19 03:14:07";

/// Normalized view of a raw column type string.
///
/// `VARCHAR(100)` parses to base `varchar` with params `100`;
/// `decimal(8,2) unsigned zerofill` parses to base `decimal`, params `8,2`,
/// unsigned. Multi-word names such as `character varying` stay intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType<'a> {
    raw: &'a str,
    base: String,
    params: Option<&'a str>,
    unsigned: bool,
}

impl<'a> ColumnType<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        let (head, params, tail) = match (trimmed.find('('), trimmed.rfind(')')) {
            (Some(open), Some(close)) if close > open => (
                &trimmed[..open],
                Some(trimmed[open + 1..close].trim()),
                &trimmed[close + 1..],
            ),
            _ => (trimmed, None, ""),
        };

        let mut unsigned = false;
        let mut words = Vec::new();
        for word in head.split_whitespace().chain(tail.split_whitespace()) {
            let word = word.to_ascii_lowercase();
            match word.as_str() {
                "unsigned" => unsigned = true,
                "signed" | "zerofill" => {}
                _ => words.push(word),
            }
        }

        Self {
            raw,
            base: words.join(" "),
            params,
            unsigned,
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Lower-cased type name without parameters or sign markers.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Contents of the parentheses, if any (`100`, `8,2`, `'a','b'`).
    pub fn params(&self) -> Option<&'a str> {
        self.params
    }

    pub fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    pub fn signedness(&self) -> bounds::Signedness {
        bounds::Signedness::from_unsigned(self.unsigned)
    }

    pub fn is_any(&self, names: &[&str]) -> bool {
        names.contains(&self.base.as_str())
    }

    /// Single numeric parameter, e.g. the `100` of `varchar(100)`.
    pub fn length(&self) -> Option<u64> {
        self.params.and_then(|params| params.parse().ok())
    }

    /// Single-quoted literals of an `enum(...)`/`set(...)` type, in order,
    /// with doubled quotes unescaped. Case is preserved.
    pub fn quoted_literals(&self) -> Vec<String> {
        static LITERAL_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = LITERAL_REGEX
            .get_or_init(|| Regex::new(r"'((?:[^']|'')*)'").expect("Invalid regex pattern"));

        re.captures_iter(self.params.unwrap_or(self.raw))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().replace("''", "'"))
            .collect()
    }
}

/// Everything a type rule may inspect.
pub(crate) struct TypeContext<'a> {
    pub ty: ColumnType<'a>,
    pub column: &'a ColumnDescriptor,
    pub config: &'a RulesConfig,
}

/// One entry of a backend's ordered type rule list.
pub(crate) struct TypeRule {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub name: &'static str,
    pub matches: fn(&TypeContext<'_>) -> bool,
    pub build: fn(&TypeContext<'_>) -> Vec<RuleToken>,
}

/// Runs the shared classification algorithm over a backend's rule list.
pub(crate) fn classify_with(
    rules: &[TypeRule],
    column: &ColumnDescriptor,
    config: &RulesConfig,
) -> RuleSet {
    let mut set = RuleSet::with_presence(column.nullable);

    if let Some(foreign_key) = &column.foreign_key {
        set.push(RuleToken::Exists {
            table: foreign_key.table.clone(),
            column: foreign_key.column.clone(),
        });
        return set;
    }

    let ctx = TypeContext {
        ty: ColumnType::parse(&column.raw_type),
        column,
        config,
    };

    match rules.iter().find(|rule| (rule.matches)(&ctx)) {
        Some(rule) => {
            #[cfg(feature = "tracing")]
            trace!(column = %column.name, rule = rule.name, "matched type rule");
            set.extend((rule.build)(&ctx));
        }
        None => {
            #[cfg(feature = "tracing")]
            trace!(column = %column.name, raw_type = %column.raw_type, "no type rule matched");
        }
    }

    set
}

pub(crate) fn boolean_tokens(_: &TypeContext<'_>) -> Vec<RuleToken> {
    vec![RuleToken::Boolean]
}

pub(crate) fn numeric_tokens(_: &TypeContext<'_>) -> Vec<RuleToken> {
    vec![RuleToken::Numeric]
}

pub(crate) fn date_tokens(_: &TypeContext<'_>) -> Vec<RuleToken> {
    vec![RuleToken::Date]
}

pub(crate) fn json_tokens(_: &TypeContext<'_>) -> Vec<RuleToken> {
    vec![RuleToken::Json]
}

pub(crate) fn year_tokens(_: &TypeContext<'_>) -> Vec<RuleToken> {
    vec![
        RuleToken::Integer,
        RuleToken::min(YEAR_MIN),
        RuleToken::max(YEAR_MAX),
    ]
}

pub(crate) fn timestamp_tokens(_: &TypeContext<'_>) -> Vec<RuleToken> {
    vec![
        RuleToken::Date,
        RuleToken::AfterOrEqual(TIMESTAMP_MIN.to_string()),
        RuleToken::BeforeOrEqual(TIMESTAMP_MAX.to_string()),
    ]
}

/// `string`, `min:<string_min_length>`, then `max:<len>` when a length is known.
pub(crate) fn string_tokens(config: &RulesConfig, max_length: Option<u64>) -> Vec<RuleToken> {
    let mut tokens = vec![RuleToken::String, RuleToken::min(config.string_min_length)];
    if let Some(length) = max_length {
        tokens.push(RuleToken::max(length));
    }
    tokens
}

/// `string` plus an `in:` membership list.
pub(crate) fn membership_tokens(values: Vec<String>) -> Vec<RuleToken> {
    vec![RuleToken::String, RuleToken::In(values)]
}

/// `integer` plus bounds; an integer type missing from the table gets no bounds.
pub(crate) fn integer_tokens(bounds: Option<IntegerBounds>) -> Vec<RuleToken> {
    let mut tokens = vec![RuleToken::Integer];
    if let Some(bounds) = bounds {
        tokens.push(RuleToken::min(bounds.min));
        tokens.push(RuleToken::max(bounds.max));
    }
    tokens
}
