//! Schema management CLI commands

use std::path::{Path, PathBuf};

use super::OutputFormat;
use crate::cli::error::CliError;
use crate::config::TpcdsConfig;
use crate::database::ConnectionProvider;
use crate::schema::resolver::resolve;
use crate::schema::{ExecutionMode, PrivilegeManager, SchemaCopier, SchemaManager};
use crate::tables::TpcdsTable;

/// Schema create command arguments
#[derive(Debug, Clone)]
pub struct SchemaCreateArgs {
    /// Directory holding `.tpcds.toml`
    pub config_dir: PathBuf,
    /// DDL script, the built-in definitions when absent
    pub script: Option<PathBuf>,
    /// Target schema override
    pub schema: Option<String>,
    /// Fail when any statement fails
    pub strict: bool,
}

/// Arguments of commands that only need a target schema
#[derive(Debug, Clone)]
pub struct SchemaTargetArgs {
    pub config_dir: PathBuf,
    pub schema: Option<String>,
    pub format: OutputFormat,
}

/// Schema copy command arguments
#[derive(Debug, Clone)]
pub struct SchemaCopyArgs {
    pub config_dir: PathBuf,
    /// Schema holding the tables
    pub source: String,
    /// Schema receiving them
    pub target: String,
    /// Tables to copy, all known tables when empty
    pub tables: Vec<String>,
    /// Copy table structure only
    pub structure_only: bool,
    pub format: OutputFormat,
}

fn open(dir: &Path) -> Result<(TpcdsConfig, Box<dyn ConnectionProvider>), CliError> {
    let config = super::load_config(dir)?;
    let provider = super::connect(&config, dir)?;
    Ok((config, provider))
}

/// Create the tables in the target schema
pub fn handle_schema_create(args: &SchemaCreateArgs) -> Result<(), CliError> {
    let (config, provider) = open(&args.config_dir)?;

    let script = match &args.script {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.clone()));
            }
            Some(
                std::fs::read_to_string(path)
                    .map_err(|e| CliError::FileReadError(path.clone(), e.to_string()))?,
            )
        }
        None => None,
    };

    let mode = if args.strict {
        ExecutionMode::Strict
    } else {
        ExecutionMode::Lenient
    };
    let manager = SchemaManager::new(provider.as_ref())
        .with_configured_schema(config.schema_name.clone())
        .with_password(config.database.password.clone())
        .with_mode(mode);

    let report = manager.create(script.as_deref(), args.schema.as_deref())?;

    if let Some(ensure) = &report.ensure
        && let Some(remediation) = &ensure.remediation
    {
        eprintln!("{}", remediation);
    }

    match &report.execution {
        Some(execution) => {
            println!("Schema create: {}", execution.outcome);
            if report.is_success() {
                Ok(())
            } else {
                super::finish("Schema create", &execution.outcome)
            }
        }
        None => Err(CliError::OperationFailed(format!(
            "Schema {} is not usable",
            report.schema
        ))),
    }
}

/// Drop the known tables from the target schema
pub fn handle_schema_drop(args: &SchemaTargetArgs) -> Result<(), CliError> {
    let (config, provider) = open(&args.config_dir)?;
    let manager =
        SchemaManager::new(provider.as_ref()).with_configured_schema(config.schema_name.clone());

    let outcome = manager.drop(args.schema.as_deref())?;
    super::finish("Schema drop", &outcome)
}

/// Print row counts of the known tables in the target schema
pub fn handle_schema_info(args: &SchemaTargetArgs) -> Result<(), CliError> {
    let (config, provider) = open(&args.config_dir)?;
    let manager =
        SchemaManager::new(provider.as_ref()).with_configured_schema(config.schema_name.clone());

    let info = manager.table_info(args.schema.as_deref())?;
    if args.format == OutputFormat::Json {
        return super::print_json(&info);
    }
    if info.is_empty() {
        println!("No TPC-DS tables found. Create them first with `schema create`");
        return Ok(());
    }

    let mut total = 0;
    for entry in &info {
        println!("  {:<24} {:>12}", entry.table.upper_name(), entry.rows);
        total += entry.rows;
    }
    println!("{} tables, {} rows", info.len(), total);
    Ok(())
}

/// Copy tables between schemas
pub fn handle_schema_copy(args: &SchemaCopyArgs) -> Result<(), CliError> {
    let (_config, provider) = open(&args.config_dir)?;

    let tables = args
        .tables
        .iter()
        .map(|name| name.parse::<TpcdsTable>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(CliError::InvalidArgument)?;
    let tables = (!tables.is_empty()).then_some(tables.as_slice());

    let report = SchemaCopier::new(provider.as_ref()).copy(
        &args.source,
        &args.target,
        tables,
        !args.structure_only,
    )?;

    if args.format == OutputFormat::Json {
        super::print_json(&report)?;
    } else {
        for (table, rows) in &report.row_counts {
            println!("  {:<24} {:>12}", table.upper_name(), rows);
        }
    }
    super::finish("Schema copy", &report.outcome)
}

/// Withdraw object creation from the target schema's principal
pub fn handle_schema_restrict(args: &SchemaTargetArgs) -> Result<(), CliError> {
    let (config, provider) = open(&args.config_dir)?;
    let schema = resolve(args.schema.as_deref(), config.configured_schema());
    if schema.is_empty() {
        return Err(CliError::InvalidArgument(
            "A target schema is required to restrict privileges".to_string(),
        ));
    }

    let report = PrivilegeManager::new(provider.as_ref()).restrict_privileges(&schema)?;
    if args.format == OutputFormat::Json {
        super::print_json(&report)?;
    } else {
        println!("{}", report.note);
    }
    if report.restricted {
        Ok(())
    } else {
        super::finish("Schema restrict", &report.outcome)
    }
}
