//! Data generation CLI command

use std::path::PathBuf;

use super::OutputFormat;
use crate::cli::error::CliError;
use crate::generator::{GeneratorConfig, SyntheticGenerator};

/// Generate data command arguments
#[derive(Debug, Clone)]
pub struct GenerateDataArgs {
    /// Directory holding `.tpcds.toml`
    pub config_dir: PathBuf,
    /// Scale factor, overrides the configured one
    pub scale: Option<u32>,
    /// Output directory, overrides the configured one
    pub output_dir: Option<PathBuf>,
    /// Seed for a reproducible data set
    pub seed: Option<u64>,
    pub format: OutputFormat,
}

/// Generate the synthetic data set and write one `.dat` file per table
pub fn handle_generate_data(args: &GenerateDataArgs) -> Result<(), CliError> {
    let config = super::load_config(&args.config_dir)?;

    let scale = args.scale.unwrap_or(config.generate.scale);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.config_dir.join(&config.generate.output_dir));
    let seed = args.seed.or(config.generate.seed);

    let generator_config = GeneratorConfig::for_scale(scale).with_seed(seed);
    if generator_config.is_test_mode() {
        tracing::info!("Generating test data set (scale 0)");
    } else {
        tracing::info!("Generating data at scale {}", scale);
    }

    let mut generator = SyntheticGenerator::new(generator_config)?;
    let summary = generator.write_to(&output_dir)?;

    if args.format == OutputFormat::Json {
        super::print_json(&summary)?;
    } else {
        for (table, rows) in &summary.rows {
            println!("  {:<24} {:>10} rows", table.name(), rows);
        }
        println!(
            "Generated {} data files ({} rows) in {}",
            summary.files_found,
            summary.total_rows(),
            summary.output_dir.display()
        );
    }

    if summary.files_found < summary.tables_written() {
        return Err(CliError::OperationFailed(format!(
            "Expected {} data files, found {}",
            summary.tables_written(),
            summary.files_found
        )));
    }
    Ok(())
}
