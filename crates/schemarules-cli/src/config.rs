//! Layered rule configuration: defaults, config file, environment, flags.
//!
//! Environment variables reach this module through clap (`env = ...` on the
//! corresponding flags), so an explicit flag always wins over its variable.

use crate::cli::Args;
use crate::error::CliError;
use anyhow::{Context, Result};
use schemarules_core::RulesConfig;
use std::fs;
use std::path::Path;

/// Builds the effective configuration for a run.
pub fn load(args: &Args) -> Result<RulesConfig> {
    let base = match &args.config {
        Some(path) => read_config_file(path)?,
        None => RulesConfig::default(),
    };
    Ok(apply_overrides(base, args))
}

fn read_config_file(path: &Path) -> Result<RulesConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    RulesConfig::from_json(&content).map_err(|source| {
        CliError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Applies flag (or environment) values on top of `config`.
pub fn apply_overrides(mut config: RulesConfig, args: &Args) -> RulesConfig {
    if let Some(enabled) = args.tinyint1_to_bool {
        config.tinyint1_to_bool = enabled;
    }
    if let Some(length) = args.string_min_length {
        config.string_min_length = length;
    }
    config.with_skip_columns(
        args.skip_columns
            .iter()
            .map(|column| column.trim())
            .filter(|column| !column.is_empty()),
    )
}

/// JSON schema of the configuration file, as printed by `--config-schema`.
pub fn config_schema_json() -> Result<String> {
    let schema = schemars::schema_for!(RulesConfig);
    serde_json::to_string_pretty(&schema).context("Failed to serialize config schema")
}
