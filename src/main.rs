//! keyplan CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, reports a failure as a
//! JSON error on stdout and exits non-zero.

use keyplan::cli;
use keyplan::observability::{Event, Logger};

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(e.code_str(), e.message());
        Logger::error(
            Event::CommandFailed.as_str(),
            &[("code", e.code_str()), ("message", e.message())],
        );
        std::process::exit(1);
    }
}
