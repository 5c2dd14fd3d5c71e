//! Schemarules CLI - validation rules from database schemas

use schemarules_cli::cli;
use schemarules_cli::config;
use schemarules_cli::error::{self, CliError};
use schemarules_cli::generate::{generate_rules, parse_table, requested_columns, resolve_factory};
use schemarules_cli::logging;
#[cfg(feature = "metadata-provider")]
use schemarules_cli::metadata;
use schemarules_cli::output;
use schemarules_cli::request;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use schemarules_core::{Driver, GeneratorFactory, RulesConfig, TableRules};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("schemarules: error: {e:#}");
            ExitCode::from(error::exit_code(&e))
        }
    }
}

fn run(args: Args) -> Result<()> {
    if args.config_schema {
        return write_output(&args.output, &config::config_schema_json()?);
    }

    // Reject multiple tables before touching the database
    let table = parse_table(args.table.as_deref().unwrap_or_default())?;
    let columns = requested_columns(&args.columns);
    let rules_config = config::load(&args)?;

    let database_url = args
        .database_url
        .as_deref()
        .ok_or(CliError::MissingDatabaseUrl)?;
    let factory = resolve_factory(args.driver.as_deref(), database_url, args.schema.as_deref())?;
    if args.schema.is_some() && factory.driver() == Driver::Sqlite && !args.quiet {
        eprintln!("schemarules: warning: --schema is ignored for sqlite databases");
    }

    let rules = fetch_rules(&factory, database_url, &rules_config, &table, &columns)?;

    if args.create_request {
        let path = request::create_request(
            &args.base_path,
            &table,
            args.file.as_deref(),
            &rules,
            args.force,
        )?;
        if !args.quiet {
            eprintln!("INFO  Request [{}] created successfully.", path.display());
        }
        return Ok(());
    }

    if !args.quiet {
        print_header(&table);
    }
    let rendered = output::render(&rules, args.format, args.compact)?;
    write_output(&args.output, &rendered)
}

#[cfg(feature = "metadata-provider")]
fn fetch_rules(
    factory: &GeneratorFactory,
    database_url: &str,
    config: &RulesConfig,
    table: &str,
    columns: &[String],
) -> Result<TableRules> {
    let catalog = metadata::SqlxCatalog::connect(database_url)
        .context("Failed to connect to database")?;
    generate_rules(factory, &catalog, config, table, columns)
}

#[cfg(not(feature = "metadata-provider"))]
fn fetch_rules(
    _factory: &GeneratorFactory,
    _database_url: &str,
    _config: &RulesConfig,
    _table: &str,
    _columns: &[String],
) -> Result<TableRules> {
    Err(CliError::NoDatabaseSupport.into())
}

fn print_header(table: &str) {
    let title = format!("Schema-based validation rules for table \"{table}\" have been generated!");
    let hint = "Copy & paste these to your controller validation or form request or where ever your validation takes place:";

    if io::stderr().is_terminal() {
        eprintln!("{}", title.green().bold());
        eprintln!("{}", hint.bold());
    } else {
        eprintln!("{title}");
        eprintln!("{hint}");
    }
}

fn write_output(path: &Option<std::path::PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure newline at end for terminal output
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
