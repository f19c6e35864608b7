//! Command line interface
//!
//! Argument structs and handlers for the `tpcds-util` binary. Handlers load
//! the configuration once, open the configured backend and map partial
//! failures to [`error::CliError::OperationFailed`] so the binary can exit
//! non-zero.

pub mod commands;
pub mod error;
