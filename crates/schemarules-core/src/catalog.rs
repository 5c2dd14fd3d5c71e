//! Minimal database access surface consumed by the metadata providers.
//!
//! The providers own the catalog SQL; a [`CatalogConnection`] only has to run a
//! read-only query with positional text parameters and hand back rows keyed by
//! column name. The CLI implements it over an `sqlx` pool; tests implement it
//! over `rusqlite` or canned rows.

use crate::error::DataAccessError;
use std::fmt;

/// A database handle able to run read-only catalog queries.
pub trait CatalogConnection {
    /// Runs `sql` with the given positional parameters and returns every row.
    fn fetch_all(&self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, DataAccessError>;
}

impl<T: CatalogConnection + ?Sized> CatalogConnection for &T {
    fn fetch_all(&self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, DataAccessError> {
        (**self).fetch_all(sql, params)
    }
}

/// A single value read from a catalog row.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CatalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{value}'"),
        }
    }
}

impl From<&str> for CatalogValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CatalogValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CatalogValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for CatalogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for CatalogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<CatalogValue>> From<Option<T>> for CatalogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One catalog result row. Column lookup is ASCII case-insensitive, since
/// MySQL and PostgreSQL disagree on the case of unquoted aliases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRow {
    values: Vec<(String, CatalogValue)>,
}

impl CatalogRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`CatalogRow::push`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CatalogValue>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CatalogValue>) {
        self.values.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&CatalogValue> {
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    fn require(&self, column: &str) -> Result<&CatalogValue, DataAccessError> {
        self.get(column)
            .ok_or_else(|| DataAccessError::MissingColumn(column.to_string()))
    }

    /// Reads a non-null text column.
    pub fn text(&self, column: &str) -> Result<String, DataAccessError> {
        self.opt_text(column)?
            .ok_or_else(|| unexpected(column, &CatalogValue::Null))
    }

    /// Reads a nullable text column. Integers are accepted and rendered in
    /// decimal, since some drivers report numeric-looking text that way.
    pub fn opt_text(&self, column: &str) -> Result<Option<String>, DataAccessError> {
        match self.require(column)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Text(value) => Ok(Some(value.clone())),
            CatalogValue::Int(value) => Ok(Some(value.to_string())),
            other => Err(unexpected(column, other)),
        }
    }

    /// Reads a nullable non-negative integer column.
    pub fn opt_u64(&self, column: &str) -> Result<Option<u64>, DataAccessError> {
        let value = self.require(column)?;
        match value {
            CatalogValue::Null => Ok(None),
            CatalogValue::Int(int) => u64::try_from(*int)
                .map(Some)
                .map_err(|_| unexpected(column, value)),
            CatalogValue::Text(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| unexpected(column, value)),
            _ => Err(unexpected(column, value)),
        }
    }

    /// Reads a non-null integer column.
    pub fn int(&self, column: &str) -> Result<i64, DataAccessError> {
        let value = self.require(column)?;
        match value {
            CatalogValue::Int(int) => Ok(*int),
            CatalogValue::Bool(flag) => Ok(i64::from(*flag)),
            CatalogValue::Text(text) => text.trim().parse().map_err(|_| unexpected(column, value)),
            _ => Err(unexpected(column, value)),
        }
    }

    /// Reads a boolean-ish column: booleans, non-zero integers, or the
    /// `YES`/`NO` strings used by `information_schema`.
    pub fn flag(&self, column: &str) -> Result<bool, DataAccessError> {
        let value = self.require(column)?;
        match value {
            CatalogValue::Bool(flag) => Ok(*flag),
            CatalogValue::Int(int) => Ok(*int != 0),
            CatalogValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" | "t" | "1" => Ok(true),
                "no" | "n" | "false" | "f" | "0" => Ok(false),
                _ => Err(unexpected(column, value)),
            },
            _ => Err(unexpected(column, value)),
        }
    }
}

fn unexpected(column: &str, value: &CatalogValue) -> DataAccessError {
    DataAccessError::UnexpectedValue {
        column: column.to_string(),
        found: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CatalogRow {
        CatalogRow::new()
            .with("COLUMN_NAME", "title")
            .with("is_nullable", "YES")
            .with("notnull", 1_i64)
            .with("character_maximum_length", Some(100_i64))
            .with("column_default", None::<String>)
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(row().text("column_name").unwrap(), "title");
    }

    #[test]
    fn test_flag_accepts_yes_no_and_ints() {
        let row = row();
        assert!(row.flag("is_nullable").unwrap());
        assert!(row.flag("notnull").unwrap());
    }

    #[test]
    fn test_nullable_columns() {
        let row = row();
        assert_eq!(row.opt_text("column_default").unwrap(), None);
        assert_eq!(row.opt_u64("character_maximum_length").unwrap(), Some(100));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let err = row().text("data_type").unwrap_err();
        assert!(matches!(err, DataAccessError::MissingColumn(name) if name == "data_type"));
    }

    #[test]
    fn test_null_in_required_text_column() {
        let err = row().text("column_default").unwrap_err();
        assert!(matches!(err, DataAccessError::UnexpectedValue { .. }));
    }

    #[test]
    fn test_malformed_flag() {
        let row = CatalogRow::new().with("is_nullable", "maybe");
        assert!(row.flag("is_nullable").is_err());
    }

    #[test]
    fn test_negative_length_rejected() {
        let row = CatalogRow::new().with("len", -1_i64);
        assert!(row.opt_u64("len").is_err());
    }
}
