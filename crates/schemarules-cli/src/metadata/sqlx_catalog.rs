//! SQLx-backed catalog connection.
//!
//! Supports PostgreSQL, MySQL, and SQLite through the `Any` driver. Queries run
//! on a private tokio runtime so the rule generator stays synchronous.

use super::normalize_url;
use schemarules_core::{CatalogConnection, CatalogRow, CatalogValue, DataAccessError};
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Column, Row};
use tokio::runtime::Runtime;
use tracing::debug;

/// A catalog connection over an `sqlx` pool.
pub struct SqlxCatalog {
    // Dropped before the runtime it was created on.
    pool: AnyPool,
    runtime: Runtime,
}

impl SqlxCatalog {
    /// Connects to the database at `url`.
    ///
    /// # Errors
    /// Returns an error if the runtime cannot start or the connection fails.
    pub fn connect(url: &str) -> Result<Self, DataAccessError> {
        sqlx::any::install_default_drivers();

        let runtime = Runtime::new().map_err(DataAccessError::query)?;
        let url = normalize_url(url);
        let pool = runtime
            .block_on(AnyPoolOptions::new().max_connections(1).connect(&url))
            .map_err(DataAccessError::query)?;

        Ok(Self { pool, runtime })
    }
}

impl CatalogConnection for SqlxCatalog {
    fn fetch_all(&self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, DataAccessError> {
        debug!(params = ?params, "running catalog query");

        let rows = self
            .runtime
            .block_on(async {
                let mut query = sqlx::query(sql);
                for param in params {
                    query = query.bind(*param);
                }
                query.fetch_all(&self.pool).await
            })
            .map_err(DataAccessError::query)?;

        Ok(rows.iter().map(catalog_row).collect())
    }
}

fn catalog_row(row: &AnyRow) -> CatalogRow {
    let mut catalog_row = CatalogRow::new();
    for column in row.columns() {
        catalog_row.push(column.name(), catalog_value(row, column.ordinal()));
    }
    catalog_row
}

/// Decodes one value, handling the different representations each database
/// uses for the same catalog column.
fn catalog_value(row: &AnyRow, index: usize) -> CatalogValue {
    // NULL decodes as `None` for any type, so the first attempt catches it.
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return value.into();
    }
    if let Ok(value) = row.try_get::<Option<i32>, _>(index) {
        return value.into();
    }
    if let Ok(value) = row.try_get::<Option<bool>, _>(index) {
        return value.into();
    }
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return value.into();
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return value.into();
    }
    if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return value
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .into();
    }
    CatalogValue::Null
}
