//! CLI-specific error types

use std::path::PathBuf;
use thiserror::Error;

use crate::database::DatabaseError;
use crate::generator::GenerateError;
use crate::loader::LoadError;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Generation error: {0}")]
    GenerateError(#[from] GenerateError),

    #[error("Load error: {0}")]
    LoadError(#[from] LoadError),

    /// The command ran but some of its units failed
    #[error("{0}")]
    OperationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}
