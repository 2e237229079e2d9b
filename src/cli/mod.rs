//! CLI module for keyplan
//!
//! Provides command-line interface for:
//! - resolve: access path for one request
//! - explain: full query plan for one request
//! - check: load and validate schemas

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    check, check_report, explain, explain_request, resolve, resolve_request, run, run_command,
};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
