//! Column metadata providers for schema introspection.
//!
//! Each backend queries its own system catalog (pragmas for SQLite,
//! `information_schema` for MySQL and PostgreSQL) and normalizes the result
//! into [`ColumnDescriptor`]s, in the catalog's natural column order, with
//! foreign-key references attached.

mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MysqlColumnProvider;
pub use postgres::PostgresColumnProvider;
pub use sqlite::SqliteColumnProvider;

use crate::catalog::CatalogRow;
use crate::error::DataAccessError;
use crate::types::{ColumnDescriptor, ForeignKeyColumn, ForeignKeyRef};
#[cfg(feature = "tracing")]
use tracing::debug;

/// A provider that can list a table's columns from the database catalog.
///
/// Implementations only issue read-only queries. Query failures are returned
/// as-is; nothing is retried or masked.
pub trait ColumnMetadataProvider {
    /// Columns of `table` in catalog order, enriched with foreign keys.
    fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DataAccessError>;

    /// Foreign-key constraints declared on `table`, one row per referencing column.
    fn fetch_foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyColumn>, DataAccessError>;
}

/// Reads a column name, rejecting empty values.
pub(crate) fn column_name(row: &CatalogRow, key: &str) -> Result<String, DataAccessError> {
    let name = row.text(key)?;
    if name.is_empty() {
        return Err(DataAccessError::UnexpectedValue {
            column: key.to_string(),
            found: "''".to_string(),
        });
    }
    Ok(name)
}

/// Attaches each foreign key to the column it references from. Keys naming an
/// unknown column are dropped; a later key on the same column replaces an
/// earlier one.
pub(crate) fn attach_foreign_keys(
    columns: &mut [ColumnDescriptor],
    foreign_keys: Vec<ForeignKeyColumn>,
) {
    for foreign_key in foreign_keys {
        match columns
            .iter_mut()
            .find(|column| column.name == foreign_key.column)
        {
            Some(column) => {
                column.foreign_key = Some(ForeignKeyRef {
                    table: foreign_key.referenced_table,
                    column: foreign_key.referenced_column,
                });
            }
            None => {
                #[cfg(feature = "tracing")]
                debug!(
                    column = %foreign_key.column,
                    "foreign key references a column missing from the column list"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foreign_key(column: &str, table: &str) -> ForeignKeyColumn {
        ForeignKeyColumn {
            column: column.to_string(),
            referenced_table: table.to_string(),
            referenced_column: "id".to_string(),
        }
    }

    #[test]
    fn test_attach_matches_by_name() {
        let mut columns = vec![
            ColumnDescriptor::new("id", "integer"),
            ColumnDescriptor::new("user_id", "integer"),
        ];
        attach_foreign_keys(&mut columns, vec![foreign_key("user_id", "users")]);

        assert!(columns[0].foreign_key.is_none());
        assert_eq!(
            columns[1].foreign_key.as_ref().map(|fk| fk.table.as_str()),
            Some("users")
        );
    }

    #[test]
    fn test_attach_ignores_unknown_columns() {
        let mut columns = vec![ColumnDescriptor::new("id", "integer")];
        attach_foreign_keys(&mut columns, vec![foreign_key("ghost_id", "ghosts")]);
        assert!(columns[0].foreign_key.is_none());
    }

    #[test]
    fn test_empty_column_name_rejected() {
        let row = CatalogRow::new().with("name", "");
        assert!(column_name(&row, "name").is_err());
    }
}
