//! Error types for rule generation.
//!
//! # Error Handling Strategy
//!
//! - [`RulesError::UnsupportedDriver`]: the configured driver has no matching
//!   engine. This is a configuration error and is never retried.
//!
//! - [`RulesError::DataAccess`]: a catalog query failed or returned rows the
//!   provider could not read. Propagated unchanged; no partial rule sets are
//!   produced.

use std::error::Error;
use thiserror::Error;

/// Top-level error returned by the engine selector and the rule generator.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("This db driver is not supported: {0}")]
    UnsupportedDriver(String),

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

/// Failure while reading schema metadata from the database catalog.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("catalog query failed: {0}")]
    Query(#[source] Box<dyn Error + Send + Sync>),

    #[error("catalog row has no `{0}` column")]
    MissingColumn(String),

    #[error("catalog column `{column}` holds unexpected value {found}")]
    UnexpectedValue { column: String, found: String },
}

impl DataAccessError {
    /// Wraps a driver error raised while running a catalog query.
    pub fn query(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Query(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_driver_display() {
        let err = RulesError::UnsupportedDriver("oracle".to_string());
        assert_eq!(err.to_string(), "This db driver is not supported: oracle");
    }

    #[test]
    fn test_data_access_is_transparent() {
        let err: RulesError = DataAccessError::MissingColumn("pk".to_string()).into();
        assert_eq!(err.to_string(), "catalog row has no `pk` column");
    }

    #[test]
    fn test_query_error_keeps_source() {
        let err = DataAccessError::query("connection refused");
        assert_eq!(err.to_string(), "catalog query failed: connection refused");
        assert!(err.source().is_some());
    }
}
