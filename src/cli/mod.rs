//! CLI module for cafedb
//!
//! Provides command-line interface for:
//! - serve: open the store and run the HTTP API
//! - check-config: validate and print the effective configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, load_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
