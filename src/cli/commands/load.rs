//! Data loading CLI commands

use std::path::PathBuf;

use super::OutputFormat;
use crate::cli::error::CliError;
use crate::loader::{BulkLoader, LoadOptions};
use crate::schema::resolver::resolve;

/// Load data command arguments
#[derive(Debug, Clone)]
pub struct LoadDataArgs {
    /// Directory holding `.tpcds.toml`
    pub config_dir: PathBuf,
    /// Directory with the `.dat` files, defaults to the generate output
    pub data_dir: Option<PathBuf>,
    /// Tables loaded concurrently
    pub parallel: Option<usize>,
    /// Load only this table
    pub table: Option<String>,
    /// Target schema override
    pub schema: Option<String>,
    /// Rows per insert batch
    pub batch_size: Option<usize>,
    pub format: OutputFormat,
}

/// Load truncate command arguments
#[derive(Debug, Clone)]
pub struct LoadTruncateArgs {
    pub config_dir: PathBuf,
    pub schema: Option<String>,
}

/// Load flat files into the target schema
pub fn handle_load_data(args: &LoadDataArgs) -> Result<(), CliError> {
    let config = super::load_config(&args.config_dir)?;
    let provider = super::connect(&config, &args.config_dir)?;

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| args.config_dir.join(&config.generate.output_dir));

    let mut options = LoadOptions::from_config(&config.load)
        .with_table(args.table.clone())
        .with_target_schema(resolve(args.schema.as_deref(), config.configured_schema()));
    if let Some(parallel) = args.parallel {
        options = options.with_parallelism(parallel);
    }
    if let Some(batch_size) = args.batch_size {
        options = options.with_batch_size(batch_size);
    }

    let report = BulkLoader::new(provider.as_ref(), options).load(&data_dir)?;

    if args.format == OutputFormat::Json {
        super::print_json(&report)?;
        return super::finish("Load", &report.outcome());
    }

    for table in &report.tables {
        let status = if table.is_success() { "ok" } else { "FAILED" };
        println!(
            "  {:<24} {:>10} rows {:>6} rejected {:>10.0} rows/s  {}",
            table.table.name(),
            table.rows_inserted(),
            table.rows_rejected(),
            table.throughput(),
            status
        );
    }

    super::finish("Load", &report.outcome())
}

/// Empty every known table in the target schema
pub fn handle_load_truncate(args: &LoadTruncateArgs) -> Result<(), CliError> {
    let config = super::load_config(&args.config_dir)?;
    let provider = super::connect(&config, &args.config_dir)?;

    let options = LoadOptions::default()
        .with_target_schema(resolve(args.schema.as_deref(), config.configured_schema()));
    let outcome = BulkLoader::new(provider.as_ref(), options).truncate()?;

    super::finish("Truncate", &outcome)
}
