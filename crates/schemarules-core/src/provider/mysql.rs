//! MySQL / MariaDB metadata from `information_schema`.

use super::{attach_foreign_keys, column_name, ColumnMetadataProvider};
use crate::catalog::{CatalogConnection, CatalogRow};
use crate::error::DataAccessError;
use crate::types::{ColumnDescriptor, ForeignKeyColumn};
#[cfg(feature = "tracing")]
use tracing::debug;

// Every text column is cast to CHAR so drivers never hand back BLOB/LONGTEXT
// values for the catalog's `longtext` columns.
const COLUMNS_SQL: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR) AS field,
        CAST(COLUMN_TYPE AS CHAR) AS column_type,
        CAST(IS_NULLABLE AS CHAR) AS is_nullable,
        CAST(COLUMN_DEFAULT AS CHAR) AS column_default,
        CAST(EXTRA AS CHAR) AS extra,
        CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS character_maximum_length
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

const COLUMNS_IN_SCHEMA_SQL: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR) AS field,
        CAST(COLUMN_TYPE AS CHAR) AS column_type,
        CAST(IS_NULLABLE AS CHAR) AS is_nullable,
        CAST(COLUMN_DEFAULT AS CHAR) AS column_default,
        CAST(EXTRA AS CHAR) AS extra,
        CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS character_maximum_length
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

const FOREIGN_KEYS_SQL: &str = r#"
    SELECT
        CAST(kcu.COLUMN_NAME AS CHAR) AS column_name,
        CAST(kcu.REFERENCED_TABLE_NAME AS CHAR) AS referenced_table,
        CAST(kcu.REFERENCED_COLUMN_NAME AS CHAR) AS referenced_column
    FROM information_schema.TABLE_CONSTRAINTS tc
    JOIN information_schema.KEY_COLUMN_USAGE kcu
        ON tc.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
        AND tc.TABLE_SCHEMA = kcu.TABLE_SCHEMA
        AND tc.TABLE_NAME = kcu.TABLE_NAME
    WHERE tc.CONSTRAINT_TYPE = 'FOREIGN KEY'
        AND tc.TABLE_SCHEMA = DATABASE()
        AND tc.TABLE_NAME = ?
    ORDER BY kcu.ORDINAL_POSITION
"#;

const FOREIGN_KEYS_IN_SCHEMA_SQL: &str = r#"
    SELECT
        CAST(kcu.COLUMN_NAME AS CHAR) AS column_name,
        CAST(kcu.REFERENCED_TABLE_NAME AS CHAR) AS referenced_table,
        CAST(kcu.REFERENCED_COLUMN_NAME AS CHAR) AS referenced_column
    FROM information_schema.TABLE_CONSTRAINTS tc
    JOIN information_schema.KEY_COLUMN_USAGE kcu
        ON tc.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
        AND tc.TABLE_SCHEMA = kcu.TABLE_SCHEMA
        AND tc.TABLE_NAME = kcu.TABLE_NAME
    WHERE tc.CONSTRAINT_TYPE = 'FOREIGN KEY'
        AND tc.TABLE_SCHEMA = ?
        AND tc.TABLE_NAME = ?
    ORDER BY kcu.ORDINAL_POSITION
"#;

/// Reads column metadata from MySQL or MariaDB.
///
/// Without a schema the connection's current database (`DATABASE()`) is used.
pub struct MysqlColumnProvider<'a> {
    conn: &'a dyn CatalogConnection,
    schema: Option<String>,
}

impl<'a> MysqlColumnProvider<'a> {
    pub fn new(conn: &'a dyn CatalogConnection) -> Self {
        Self { conn, schema: None }
    }

    pub fn with_schema(mut self, schema: Option<String>) -> Self {
        self.schema = schema;
        self
    }

    fn query(
        &self,
        current_schema_sql: &str,
        in_schema_sql: &str,
        table: &str,
    ) -> Result<Vec<CatalogRow>, DataAccessError> {
        match self.schema.as_deref() {
            Some(schema) => self.conn.fetch_all(in_schema_sql, &[schema, table]),
            None => self.conn.fetch_all(current_schema_sql, &[table]),
        }
    }
}

fn describe_row(row: &CatalogRow) -> Result<ColumnDescriptor, DataAccessError> {
    let extra = row.opt_text("extra")?.unwrap_or_default();
    Ok(ColumnDescriptor {
        name: column_name(row, "field")?,
        raw_type: row.text("column_type")?,
        nullable: row.flag("is_nullable")?,
        is_auto_increment: extra.to_ascii_lowercase().contains("auto_increment"),
        character_max_length: row.opt_u64("character_maximum_length")?,
        foreign_key: None,
        enum_values: None,
    })
}

impl ColumnMetadataProvider for MysqlColumnProvider<'_> {
    fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DataAccessError> {
        let mut columns = self
            .query(COLUMNS_SQL, COLUMNS_IN_SCHEMA_SQL, table)?
            .iter()
            .map(describe_row)
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(feature = "tracing")]
        debug!(table, columns = columns.len(), "fetched mysql columns");

        if !columns.is_empty() {
            attach_foreign_keys(&mut columns, self.fetch_foreign_keys(table)?);
        }
        Ok(columns)
    }

    fn fetch_foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyColumn>, DataAccessError> {
        self.query(FOREIGN_KEYS_SQL, FOREIGN_KEYS_IN_SCHEMA_SQL, table)?
            .iter()
            .map(|row| {
                Ok(ForeignKeyColumn {
                    column: column_name(row, "column_name")?,
                    referenced_table: row.text("referenced_table")?,
                    referenced_column: row.text("referenced_column")?,
                })
            })
            .collect()
    }
}
