//! Schema-driven validation rule generation.
//!
//! Reads a table's column metadata from SQLite, MySQL, or PostgreSQL system
//! catalogs and derives an ordered list of validation rule tokens per column
//! (`required`, `integer`, `min:0`, `exists:users,id`, ...).

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod provider;
pub mod types;

// Re-export main types and functions
pub use catalog::{CatalogConnection, CatalogRow, CatalogValue};
pub use classifier::bounds::{IntegerBounds, IntegerBoundsTable, Signedness};
pub use classifier::{ColumnType, Classifier};
pub use config::{RulesConfig, DEFAULT_SKIP_COLUMNS};
pub use engine::{select, Driver, GeneratorFactory};
pub use error::{DataAccessError, RulesError};
pub use generator::{build_table_rules, TableRuleGenerator};
pub use provider::{
    ColumnMetadataProvider, MysqlColumnProvider, PostgresColumnProvider, SqliteColumnProvider,
};
pub use types::{ColumnDescriptor, ForeignKeyColumn, ForeignKeyRef, RuleSet, RuleToken, TableRules};
