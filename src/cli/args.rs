//! CLI argument definitions using clap
//!
//! Commands:
//! - cafedb serve --config <path> [--host <host>] [--port <port>] [--data-file <path>] [--legacy-errors]
//! - cafedb check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cafedb - A small self-hostable directory service for cafés
#[derive(Parser, Debug)]
#[command(name = "cafedb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to configuration file. Defaults apply if it does not exist.
        #[arg(long, default_value = "./cafedb.json")]
        config: PathBuf,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(long)]
        port: Option<u16>,

        /// Override the JSON snapshot file
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Send error bodies with 200 OK
        #[arg(long)]
        legacy_errors: bool,
    },

    /// Validate a configuration file and print the effective settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./cafedb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
