//! Column descriptors and the rule tokens derived from them.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Referenced side of a foreign-key constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    pub table: String,
    pub column: String,
}

/// One row of a table's foreign-key listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyColumn {
    /// Referencing column on the inspected table.
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// Backend-agnostic view of one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Backend-native type, e.g. `varchar(100)` or `tinyint(1) unsigned`.
    pub raw_type: String,
    pub nullable: bool,
    /// Database assigns the value on insert (auto_increment, `nextval(...)`
    /// default, or the SQLite primary-key flag).
    pub is_auto_increment: bool,
    /// Declared maximum length of a bounded string column, when the catalog
    /// reports one.
    pub character_max_length: Option<u64>,
    pub foreign_key: Option<ForeignKeyRef>,
    /// Labels of a PostgreSQL enum type, in sort order.
    pub enum_values: Option<Vec<String>>,
}

impl ColumnDescriptor {
    /// Creates a non-nullable column with no constraints.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: false,
            is_auto_increment: false,
            character_max_length: None,
            foreign_key: None,
            enum_values: None,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_auto_increment(mut self, auto_increment: bool) -> Self {
        self.is_auto_increment = auto_increment;
        self
    }

    pub fn with_max_length(mut self, length: u64) -> Self {
        self.character_max_length = Some(length);
        self
    }

    pub fn with_foreign_key(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKeyRef {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// A single validation instruction.
///
/// Renders as the plain-string token consumers embed in their validation
/// arrays (see the [`fmt::Display`] impl).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleToken {
    Required,
    Nullable,
    Exists { table: String, column: String },
    Boolean,
    String,
    Integer,
    Numeric,
    Date,
    Json,
    Min(String),
    Max(String),
    In(Vec<String>),
    AfterOrEqual(String),
    BeforeOrEqual(String),
}

impl RuleToken {
    /// Presence token for a column: `nullable` or `required`.
    pub fn presence(nullable: bool) -> Self {
        if nullable {
            Self::Nullable
        } else {
            Self::Required
        }
    }

    pub fn min(value: impl ToString) -> Self {
        Self::Min(value.to_string())
    }

    pub fn max(value: impl ToString) -> Self {
        Self::Max(value.to_string())
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Nullable => f.write_str("nullable"),
            Self::Exists { table, column } => write!(f, "exists:{table},{column}"),
            Self::Boolean => f.write_str("boolean"),
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Numeric => f.write_str("numeric"),
            Self::Date => f.write_str("date"),
            Self::Json => f.write_str("json"),
            Self::Min(value) => write!(f, "min:{value}"),
            Self::Max(value) => write!(f, "max:{value}"),
            Self::In(values) => write!(f, "in:{}", values.join(",")),
            Self::AfterOrEqual(value) => write!(f, "after_or_equal:{value}"),
            Self::BeforeOrEqual(value) => write!(f, "before_or_equal:{value}"),
        }
    }
}

impl Serialize for RuleToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered rule tokens for one column.
///
/// Always starts with the presence token; tokens are never reordered or
/// deduplicated after emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet(Vec<RuleToken>);

impl RuleSet {
    /// Starts a rule set with the presence token for the column.
    pub fn with_presence(nullable: bool) -> Self {
        Self(vec![RuleToken::presence(nullable)])
    }

    pub fn push(&mut self, token: RuleToken) {
        self.0.push(token);
    }

    pub fn tokens(&self) -> &[RuleToken] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleToken> {
        self.0.iter()
    }

    /// Renders every token as its string form.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl Extend<RuleToken> for RuleSet {
    fn extend<I: IntoIterator<Item = RuleToken>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RuleToken;
    type IntoIter = std::slice::Iter<'a, RuleToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Column name to rule set, in the table's natural column order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TableRules(IndexMap<String, RuleSet>);

impl TableRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, rules: RuleSet) {
        self.0.insert(column.into(), rules);
    }

    pub fn get(&self, column: &str) -> Option<&RuleSet> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column names in output order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, RuleSet> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a TableRules {
    type Item = (&'a String, &'a RuleSet);
    type IntoIter = indexmap::map::Iter<'a, String, RuleSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
