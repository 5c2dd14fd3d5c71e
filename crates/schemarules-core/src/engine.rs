//! Driver selection: maps a driver identifier to its provider and classifier.

use crate::catalog::CatalogConnection;
use crate::classifier::{self, Classifier};
use crate::config::RulesConfig;
use crate::error::RulesError;
use crate::generator::TableRuleGenerator;
use crate::provider::{
    ColumnMetadataProvider, MysqlColumnProvider, PostgresColumnProvider, SqliteColumnProvider,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Sqlite,
    Mysql,
    Pgsql,
}

impl Driver {
    pub const ALL: [Driver; 3] = [Driver::Sqlite, Driver::Mysql, Driver::Pgsql];

    /// Canonical identifier, as accepted by [`select`].
    pub fn name(self) -> &'static str {
        match self {
            Driver::Sqlite => "sqlite",
            Driver::Mysql => "mysql",
            Driver::Pgsql => "pgsql",
        }
    }

    /// Infers the driver from a connection URL scheme.
    pub fn from_url(url: &str) -> Result<Self, RulesError> {
        let scheme = url.split_once(':').map_or(url, |(scheme, _)| scheme);
        scheme.parse()
    }

    pub fn classifier(self) -> Classifier {
        match self {
            Driver::Sqlite => classifier::sqlite::classify,
            Driver::Mysql => classifier::mysql::classify,
            Driver::Pgsql => classifier::postgres::classify,
        }
    }
}

impl FromStr for Driver {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Driver::Sqlite),
            "mysql" | "mariadb" => Ok(Driver::Mysql),
            "pgsql" | "postgres" | "postgresql" => Ok(Driver::Pgsql),
            _ => Err(RulesError::UnsupportedDriver(s.to_string())),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves a driver identifier to a generator factory.
///
/// Fails with [`RulesError::UnsupportedDriver`] for anything outside the
/// supported set.
pub fn select(driver_name: &str) -> Result<GeneratorFactory, RulesError> {
    Ok(GeneratorFactory::new(driver_name.parse()?))
}

/// Builds per-call providers and generators for one driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorFactory {
    driver: Driver,
    schema: Option<String>,
}

impl GeneratorFactory {
    pub fn new(driver: Driver) -> Self {
        Self {
            driver,
            schema: None,
        }
    }

    /// Scopes MySQL and PostgreSQL catalog queries to `schema` instead of the
    /// connection's current one. Ignored for SQLite.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    pub fn provider<'a>(
        &self,
        conn: &'a dyn CatalogConnection,
    ) -> Box<dyn ColumnMetadataProvider + 'a> {
        match self.driver {
            Driver::Sqlite => Box::new(SqliteColumnProvider::new(conn)),
            Driver::Mysql => {
                Box::new(MysqlColumnProvider::new(conn).with_schema(self.schema.clone()))
            }
            Driver::Pgsql => {
                Box::new(PostgresColumnProvider::new(conn).with_schema(self.schema.clone()))
            }
        }
    }

    pub fn build<'a>(
        &self,
        conn: &'a dyn CatalogConnection,
        config: &'a RulesConfig,
    ) -> TableRuleGenerator<'a> {
        TableRuleGenerator::new(self.provider(conn), self.driver.classifier(), config)
    }
}
