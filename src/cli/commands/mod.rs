//! CLI command implementations

pub mod config;
pub mod db;
pub mod generate;
pub mod load;
pub mod schema;

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::cli::error::CliError;
use crate::config::TpcdsConfig;
use crate::database::{ConnectionProvider, open_provider};
use crate::outcome::Outcome;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {} (expected table or json)", s)),
        }
    }
}

/// Print a report as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(report: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| CliError::IoError(format!("Failed to serialize report: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Load `.tpcds.toml` from a directory, with environment overrides applied
pub(crate) fn load_config(dir: &Path) -> Result<TpcdsConfig, CliError> {
    TpcdsConfig::load(dir).map_err(|e| CliError::ConfigError(e.to_string()))
}

/// Open the backend the configuration selects
pub(crate) fn connect(
    config: &TpcdsConfig,
    dir: &Path,
) -> Result<Box<dyn ConnectionProvider>, CliError> {
    Ok(open_provider(config, dir)?)
}

/// Turn a tally into the command result
///
/// # Arguments
/// * `what` - Name of the operation, used in the failure message
/// * `outcome` - Tally of the operation's units
pub(crate) fn finish(what: &str, outcome: &Outcome) -> Result<(), CliError> {
    if outcome.is_success() {
        tracing::info!("{}: {}", what, outcome);
        return Ok(());
    }

    for failure in &outcome.failures {
        eprintln!("  {}", failure);
    }
    Err(CliError::OperationFailed(format!(
        "{} incomplete: {} ({:.0}%)",
        what,
        outcome,
        outcome.ratio() * 100.0
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish() {
        let mut outcome = Outcome::new();
        outcome.succeed(3);
        assert!(finish("Drop", &outcome).is_ok());

        outcome.fail("ITEM: locked");
        let err = finish("Drop", &outcome).unwrap_err();
        assert_eq!(err.to_string(), "Drop incomplete: 3/4 succeeded (75%)");
    }

    #[test]
    fn test_output_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
