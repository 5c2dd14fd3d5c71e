#![allow(dead_code)]

use rusqlite::types::ValueRef;
use schemarules_core::{CatalogConnection, CatalogRow, CatalogValue, DataAccessError};
use std::cell::RefCell;

/// Canned catalog: answers a query with the rows of the first route whose
/// marker appears in the SQL text. Unrouted queries return no rows.
#[derive(Default)]
pub struct FakeCatalog {
    routes: Vec<(&'static str, Vec<CatalogRow>)>,
    queries: RefCell<Vec<(String, Vec<String>)>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, marker: &'static str, rows: Vec<CatalogRow>) -> Self {
        self.routes.push((marker, rows));
        self
    }

    /// Every query issued so far, with its parameters.
    pub fn queries(&self) -> Vec<(String, Vec<String>)> {
        self.queries.borrow().clone()
    }
}

impl CatalogConnection for FakeCatalog {
    fn fetch_all(&self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, DataAccessError> {
        self.queries.borrow_mut().push((
            sql.to_string(),
            params.iter().map(|param| param.to_string()).collect(),
        ));

        Ok(self
            .routes
            .iter()
            .find(|(marker, _)| sql.contains(marker))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

/// Catalog that fails every query, as a dropped connection would.
pub struct BrokenCatalog;

impl CatalogConnection for BrokenCatalog {
    fn fetch_all(&self, _sql: &str, _params: &[&str]) -> Result<Vec<CatalogRow>, DataAccessError> {
        Err(DataAccessError::query("server has gone away"))
    }
}

/// Real SQLite catalog over an in-memory `rusqlite` connection.
pub struct SqliteCatalog {
    conn: rusqlite::Connection,
}

impl SqliteCatalog {
    pub fn with_schema(ddl: &str) -> Self {
        let conn = rusqlite::Connection::open_in_memory().expect("open in-memory database");
        conn.execute_batch(ddl).expect("apply schema");
        Self { conn }
    }
}

impl CatalogConnection for SqliteCatalog {
    fn fetch_all(&self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, DataAccessError> {
        let mut stmt = self.conn.prepare(sql).map_err(DataAccessError::query)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(DataAccessError::query)?;

        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(DataAccessError::query)? {
            let mut catalog_row = CatalogRow::new();
            for (index, name) in names.iter().enumerate() {
                let value = match row.get_ref(index).map_err(DataAccessError::query)? {
                    ValueRef::Null => CatalogValue::Null,
                    ValueRef::Integer(value) => CatalogValue::Int(value),
                    ValueRef::Real(value) => CatalogValue::Float(value),
                    ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                        CatalogValue::Text(String::from_utf8_lossy(bytes).into_owned())
                    }
                };
                catalog_row.push(name.clone(), value);
            }
            result.push(catalog_row);
        }
        Ok(result)
    }
}

/// One MySQL `information_schema.COLUMNS` row as the provider selects it.
pub fn mysql_column(
    field: &str,
    column_type: &str,
    nullable: bool,
    extra: &str,
    max_length: Option<i64>,
) -> CatalogRow {
    CatalogRow::new()
        .with("field", field)
        .with("column_type", column_type)
        .with("is_nullable", if nullable { "YES" } else { "NO" })
        .with("column_default", None::<String>)
        .with("extra", extra)
        .with("character_maximum_length", max_length)
}

/// One PostgreSQL `information_schema.columns` row as the provider selects it.
pub fn postgres_column(
    name: &str,
    data_type: &str,
    udt_name: &str,
    nullable: bool,
    default: Option<&str>,
    max_length: Option<i64>,
) -> CatalogRow {
    let udt_schema = if data_type == "USER-DEFINED" {
        "public"
    } else {
        "pg_catalog"
    };
    CatalogRow::new()
        .with("column_name", name)
        .with("data_type", data_type)
        .with("udt_schema", udt_schema)
        .with("udt_name", udt_name)
        .with("character_maximum_length", max_length)
        .with("is_nullable", if nullable { "YES" } else { "NO" })
        .with("column_default", default)
}

/// A PostgreSQL column of a user-defined type owned by `schema`.
pub fn postgres_type_column(name: &str, schema: &str, udt_name: &str) -> CatalogRow {
    CatalogRow::new()
        .with("column_name", name)
        .with("data_type", "USER-DEFINED")
        .with("udt_schema", schema)
        .with("udt_name", udt_name)
        .with("character_maximum_length", None::<i64>)
        .with("is_nullable", "NO")
        .with("column_default", None::<String>)
}

/// One `pg_enum` label row.
pub fn enum_label_row(schema: &str, type_name: &str, label: &str) -> CatalogRow {
    CatalogRow::new()
        .with("type_schema", schema)
        .with("type_name", type_name)
        .with("label", label)
}

/// One foreign-key row, shared by the MySQL and PostgreSQL providers.
pub fn foreign_key_row(column: &str, table: &str, referenced: &str) -> CatalogRow {
    CatalogRow::new()
        .with("column_name", column)
        .with("referenced_table", table)
        .with("referenced_column", referenced)
}
