//! CLI argument definitions using clap
//!
//! Commands:
//! - keyplan resolve --config <path> [--table <name>]
//! - keyplan explain --config <path> [--table <name>]
//! - keyplan check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// keyplan - access-path planner for hash/range keyed tables
#[derive(Parser, Debug)]
#[command(name = "keyplan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the access path for one request read from stdin
    Resolve {
        /// Path to configuration file
        #[arg(long, default_value = "./keyplan.json")]
        config: PathBuf,

        /// Table to plan against (overrides the request's "table")
        #[arg(long)]
        table: Option<String>,
    },

    /// Explain the full query plan for one request read from stdin
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./keyplan.json")]
        config: PathBuf,

        /// Table to plan against (overrides the request's "table")
        #[arg(long)]
        table: Option<String>,
    },

    /// Load and validate every table schema
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./keyplan.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
