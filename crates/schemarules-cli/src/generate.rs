//! The `schemarules <TABLE>` command, independent of how the database is reached.

use crate::error::CliError;
use anyhow::{Context, Result};
use schemarules_core::{
    build_table_rules, select, CatalogConnection, Driver, GeneratorFactory, RulesConfig,
    TableRules,
};
use tracing::{debug, info};

/// Splits the table argument, rejecting more than one table.
pub fn parse_table(raw: &str) -> Result<String, CliError> {
    let tables: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|table| !table.is_empty())
        .map(str::to_string)
        .collect();

    match tables.as_slice() {
        [table] => Ok(table.clone()),
        [] => Err(CliError::TableNotFound(raw.to_string())),
        _ => Err(CliError::MultipleTables(tables)),
    }
}

/// Requested column names with blanks removed.
pub fn requested_columns(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|column| column.trim())
        .filter(|column| !column.is_empty())
        .map(str::to_string)
        .collect()
}

/// Chooses the engine from `--driver`, falling back to the URL scheme.
pub fn resolve_factory(
    driver: Option<&str>,
    database_url: &str,
    schema: Option<&str>,
) -> Result<GeneratorFactory> {
    let factory = match driver {
        Some(name) => select(name)?,
        None => GeneratorFactory::new(
            Driver::from_url(database_url).context("Failed to infer driver from database URL")?,
        ),
    };
    Ok(match schema {
        Some(schema) => factory.with_schema(schema),
        None => factory,
    })
}

/// Generates rules for `table`, checking that the table and every requested
/// column exist first.
pub fn generate_rules(
    factory: &GeneratorFactory,
    conn: &dyn CatalogConnection,
    config: &RulesConfig,
    table: &str,
    columns: &[String],
) -> Result<TableRules> {
    info!(driver = %factory.driver(), table, "generating rules");

    let generator = factory.build(conn, config);
    let descriptors = generator
        .describe(table)
        .with_context(|| format!("Failed to read columns of table '{table}'"))?;

    if descriptors.is_empty() {
        return Err(CliError::TableNotFound(table.to_string()).into());
    }

    let missing: Vec<String> = columns
        .iter()
        .filter(|column| !descriptors.iter().any(|d| &d.name == *column))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(CliError::ColumnsNotFound {
            table: table.to_string(),
            missing,
        }
        .into());
    }

    let rules = build_table_rules(
        &descriptors,
        columns,
        factory.driver().classifier(),
        config,
    );
    debug!(columns = rules.len(), "rules generated");
    Ok(rules)
}
