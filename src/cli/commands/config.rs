//! Configuration file CLI command

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, TpcdsConfig, sample_config};

/// Config init command arguments
#[derive(Debug, Clone)]
pub struct ConfigInitArgs {
    /// Directory that receives `.tpcds.toml`
    pub dir: PathBuf,
    /// Overwrite an existing file
    pub force: bool,
}

/// Write a commented sample `.tpcds.toml`
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), CliError> {
    if TpcdsConfig::exists(&args.dir) && !args.force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists in {}. Use --force to overwrite.",
            CONFIG_FILENAME,
            args.dir.display()
        )));
    }

    let path = args.dir.join(CONFIG_FILENAME);
    std::fs::write(&path, sample_config())
        .map_err(|e| CliError::IoError(format!("Failed to write {}: {}", path.display(), e)))?;

    println!("Wrote {}", path.display());
    Ok(())
}

/// Print the effective configuration, environment overrides included
pub fn handle_config_show(dir: &std::path::Path) -> Result<(), CliError> {
    let config = super::load_config(dir)?;
    let toml = config
        .to_toml()
        .map_err(|e| CliError::ConfigError(e.to_string()))?;
    println!("{}", toml);
    Ok(())
}
