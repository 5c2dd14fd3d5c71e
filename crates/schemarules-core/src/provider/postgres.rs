//! PostgreSQL metadata from `information_schema` and `pg_enum`.

use super::{attach_foreign_keys, column_name, ColumnMetadataProvider};
use crate::catalog::{CatalogConnection, CatalogRow};
use crate::error::DataAccessError;
use crate::types::{ColumnDescriptor, ForeignKeyColumn};
use indexmap::IndexMap;
#[cfg(feature = "tracing")]
use tracing::debug;

const USER_DEFINED: &str = "USER-DEFINED";

const COLUMNS_SQL: &str = r#"
    SELECT
        column_name::text AS column_name,
        data_type::text AS data_type,
        udt_schema::text AS udt_schema,
        udt_name::text AS udt_name,
        character_maximum_length::bigint AS character_maximum_length,
        is_nullable::text AS is_nullable,
        column_default::text AS column_default
    FROM information_schema.columns
    WHERE table_schema = current_schema() AND table_name = $1
    ORDER BY ordinal_position
"#;

const COLUMNS_IN_SCHEMA_SQL: &str = r#"
    SELECT
        column_name::text AS column_name,
        data_type::text AS data_type,
        udt_schema::text AS udt_schema,
        udt_name::text AS udt_name,
        character_maximum_length::bigint AS character_maximum_length,
        is_nullable::text AS is_nullable,
        column_default::text AS column_default
    FROM information_schema.columns
    WHERE table_schema = $2 AND table_name = $1
    ORDER BY ordinal_position
"#;

// Referenced columns are paired through `referential_constraints` by position
// so composite keys map column to column.
const FOREIGN_KEYS_SQL: &str = r#"
    SELECT
        kcu.column_name::text AS column_name,
        ref.table_name::text AS referenced_table,
        ref.column_name::text AS referenced_column
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
        ON kcu.constraint_schema = tc.constraint_schema
        AND kcu.constraint_name = tc.constraint_name
    JOIN information_schema.referential_constraints rc
        ON rc.constraint_schema = tc.constraint_schema
        AND rc.constraint_name = tc.constraint_name
    JOIN information_schema.key_column_usage ref
        ON ref.constraint_schema = rc.unique_constraint_schema
        AND ref.constraint_name = rc.unique_constraint_name
        AND ref.ordinal_position = kcu.position_in_unique_constraint
    WHERE tc.constraint_type = 'FOREIGN KEY'
        AND tc.table_schema = current_schema()
        AND tc.table_name = $1
    ORDER BY tc.constraint_name, kcu.ordinal_position
"#;

const FOREIGN_KEYS_IN_SCHEMA_SQL: &str = r#"
    SELECT
        kcu.column_name::text AS column_name,
        ref.table_name::text AS referenced_table,
        ref.column_name::text AS referenced_column
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
        ON kcu.constraint_schema = tc.constraint_schema
        AND kcu.constraint_name = tc.constraint_name
    JOIN information_schema.referential_constraints rc
        ON rc.constraint_schema = tc.constraint_schema
        AND rc.constraint_name = tc.constraint_name
    JOIN information_schema.key_column_usage ref
        ON ref.constraint_schema = rc.unique_constraint_schema
        AND ref.constraint_name = rc.unique_constraint_name
        AND ref.ordinal_position = kcu.position_in_unique_constraint
    WHERE tc.constraint_type = 'FOREIGN KEY'
        AND tc.table_schema = $2
        AND tc.table_name = $1
    ORDER BY tc.constraint_name, kcu.ordinal_position
"#;

// Types arrive as two parallel comma-joined parameters (schemas, names) so the
// query shape does not depend on how many enum columns the table has.
const ENUM_LABELS_SQL: &str = r#"
    SELECT
        n.nspname::text AS type_schema,
        t.typname::text AS type_name,
        e.enumlabel::text AS label
    FROM unnest(string_to_array($1, ','), string_to_array($2, ','))
        AS wanted(schema_name, type_name)
    JOIN pg_namespace n ON n.nspname = wanted.schema_name
    JOIN pg_type t ON t.typnamespace = n.oid AND t.typname = wanted.type_name
    JOIN pg_enum e ON e.enumtypid = t.oid
    ORDER BY n.nspname, t.typname, e.enumsortorder
"#;

/// A user-defined type, qualified by the schema that owns it.
type TypeKey = (String, String);

/// Reads column metadata from PostgreSQL.
///
/// Without a schema the connection's `current_schema()` is used. Columns of a
/// user-defined enum type get the type name as `raw_type` and their labels as
/// `enum_values`.
pub struct PostgresColumnProvider<'a> {
    conn: &'a dyn CatalogConnection,
    schema: Option<String>,
}

impl<'a> PostgresColumnProvider<'a> {
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
            Some(schema) => self.conn.fetch_all(in_schema_sql, &[table, schema]),
            None => self.conn.fetch_all(current_schema_sql, &[table]),
        }
    }

    /// Labels of each enum type, keyed by (schema, name), in declaration order.
    fn enum_labels(
        &self,
        types: &[TypeKey],
    ) -> Result<IndexMap<TypeKey, Vec<String>>, DataAccessError> {
        let mut labels: IndexMap<TypeKey, Vec<String>> = IndexMap::new();
        if types.is_empty() {
            return Ok(labels);
        }

        let schemas: Vec<&str> = types.iter().map(|(schema, _)| schema.as_str()).collect();
        let names: Vec<&str> = types.iter().map(|(_, name)| name.as_str()).collect();
        let (schemas, names) = (schemas.join(","), names.join(","));
        for row in self
            .conn
            .fetch_all(ENUM_LABELS_SQL, &[schemas.as_str(), names.as_str()])?
        {
            labels
                .entry((row.text("type_schema")?, row.text("type_name")?))
                .or_default()
                .push(row.text("label")?);
        }
        Ok(labels)
    }
}

fn describe_row(row: &CatalogRow) -> Result<ColumnDescriptor, DataAccessError> {
    let data_type = row.text("data_type")?;
    let raw_type = if data_type == USER_DEFINED {
        row.text("udt_name")?
    } else {
        data_type
    };
    let default = row.opt_text("column_default")?.unwrap_or_default();

    Ok(ColumnDescriptor {
        name: column_name(row, "column_name")?,
        raw_type,
        nullable: row.flag("is_nullable")?,
        is_auto_increment: default.contains("nextval("),
        character_max_length: row.opt_u64("character_maximum_length")?,
        foreign_key: None,
        enum_values: None,
    })
}

impl ColumnMetadataProvider for PostgresColumnProvider<'_> {
    fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DataAccessError> {
        let rows = self.query(COLUMNS_SQL, COLUMNS_IN_SCHEMA_SQL, table)?;

        let mut columns = Vec::with_capacity(rows.len());
        let mut user_defined: Vec<(usize, TypeKey)> = Vec::new();
        for row in &rows {
            let column = describe_row(row)?;
            if row.text("data_type")? == USER_DEFINED {
                let key = (row.text("udt_schema")?, column.raw_type.clone());
                user_defined.push((columns.len(), key));
            }
            columns.push(column);
        }

        #[cfg(feature = "tracing")]
        debug!(table, columns = columns.len(), "fetched postgres columns");

        if columns.is_empty() {
            return Ok(columns);
        }

        if !user_defined.is_empty() {
            let mut types: Vec<TypeKey> =
                user_defined.iter().map(|(_, key)| key.clone()).collect();
            types.sort_unstable();
            types.dedup();

            let labels = self.enum_labels(&types)?;
            for (index, key) in &user_defined {
                // Composite and domain types have no labels and stay unclassified.
                if let Some(values) = labels.get(key) {
                    columns[*index].enum_values = Some(values.clone());
                }
            }
        }

        attach_foreign_keys(&mut columns, self.fetch_foreign_keys(table)?);
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
