//! Caller-level errors and their exit codes.

use schemarules_core::RulesError;
use std::path::PathBuf;
use thiserror::Error;

/// Rules could not be generated or written.
pub const EXIT_FAILURE: u8 = 1;
/// Configuration error (bad arguments, config file, or driver).
pub const EXIT_CONFIG_ERROR: u8 = 66;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("The command can only handle one table at a time - you gave: {}", .0.join(", "))]
    MultipleTables(Vec<String>),

    #[error("Table '{0}' not found!")]
    TableNotFound(String),

    #[error("The following columns do not exist on the table '{table}': {}", .missing.join(", "))]
    ColumnsNotFound { table: String, missing: Vec<String> },

    #[error("no database URL given (use --database-url or set DATABASE_URL)")]
    MissingDatabaseUrl,

    #[error("invalid configuration file {}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request class already exists: {} (use --force to overwrite)", .0.display())]
    RequestExists(PathBuf),

    #[error("this build has no database support (enable the `metadata-provider` feature)")]
    NoDatabaseSupport,
}

impl CliError {
    fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MultipleTables(_)
                | Self::MissingDatabaseUrl
                | Self::InvalidConfig { .. }
                | Self::NoDatabaseSupport
        )
    }
}

/// Maps an error chain to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let configuration = err.chain().any(|cause| {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.is_configuration();
        }
        matches!(
            cause.downcast_ref::<RulesError>(),
            Some(RulesError::UnsupportedDriver(_))
        )
    });

    if configuration {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_FAILURE
    }
}
