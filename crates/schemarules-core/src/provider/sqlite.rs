//! SQLite metadata via the `table_info` and `foreign_key_list` pragmas.

use super::{attach_foreign_keys, column_name, ColumnMetadataProvider};
use crate::catalog::{CatalogConnection, CatalogRow};
use crate::error::DataAccessError;
use crate::types::{ColumnDescriptor, ForeignKeyColumn};
#[cfg(feature = "tracing")]
use tracing::debug;

// Table-valued pragma functions accept bound parameters, unlike `PRAGMA x('t')`.
// `notnull`, `from`, `table` and `to` are keywords and must stay quoted.
const TABLE_INFO_SQL: &str = r#"
    SELECT "name", "type", "notnull", "dflt_value", "pk"
    FROM pragma_table_info(?)
    ORDER BY "cid"
"#;

const FOREIGN_KEY_LIST_SQL: &str = r#"
    SELECT "from", "table", "to"
    FROM pragma_foreign_key_list(?)
    ORDER BY "id", "seq"
"#;

/// Reads column metadata from an SQLite database file.
///
/// SQLite has no auto-increment flag in `table_info`; primary-key columns
/// (`pk > 0`) are treated as database-assigned.
pub struct SqliteColumnProvider<'a> {
    conn: &'a dyn CatalogConnection,
}

impl<'a> SqliteColumnProvider<'a> {
    pub fn new(conn: &'a dyn CatalogConnection) -> Self {
        Self { conn }
    }

    fn table_info(&self, table: &str) -> Result<Vec<CatalogRow>, DataAccessError> {
        self.conn.fetch_all(TABLE_INFO_SQL, &[table])
    }

    /// First primary-key column of `table`, the implicit target of
    /// `REFERENCES table` without a column list.
    fn primary_key_of(&self, table: &str) -> Result<Option<String>, DataAccessError> {
        for row in self.table_info(table)? {
            if row.int("pk")? == 1 {
                return column_name(&row, "name").map(Some);
            }
        }
        Ok(None)
    }
}

impl ColumnMetadataProvider for SqliteColumnProvider<'_> {
    fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DataAccessError> {
        let mut columns = self
            .table_info(table)?
            .iter()
            .map(|row| {
                Ok(ColumnDescriptor {
                    name: column_name(row, "name")?,
                    raw_type: row.opt_text("type")?.unwrap_or_default(),
                    nullable: !row.flag("notnull")?,
                    is_auto_increment: row.int("pk")? > 0,
                    character_max_length: None,
                    foreign_key: None,
                    enum_values: None,
                })
            })
            .collect::<Result<Vec<_>, DataAccessError>>()?;

        #[cfg(feature = "tracing")]
        debug!(table, columns = columns.len(), "fetched sqlite table_info");

        if !columns.is_empty() {
            attach_foreign_keys(&mut columns, self.fetch_foreign_keys(table)?);
        }
        Ok(columns)
    }

    fn fetch_foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyColumn>, DataAccessError> {
        let mut foreign_keys = Vec::new();

        for row in self.conn.fetch_all(FOREIGN_KEY_LIST_SQL, &[table])? {
            let column = column_name(&row, "from")?;
            let referenced_table = row.text("table")?;
            let referenced_column = match row.opt_text("to")? {
                Some(to) => Some(to),
                None => self.primary_key_of(&referenced_table)?,
            };

            match referenced_column {
                Some(referenced_column) => foreign_keys.push(ForeignKeyColumn {
                    column,
                    referenced_table,
                    referenced_column,
                }),
                None => {
                    #[cfg(feature = "tracing")]
                    debug!(
                        %column,
                        %referenced_table,
                        "skipping foreign key to a table without a primary key"
                    );
                }
            }
        }

        Ok(foreign_keys)
    }
}
