//! typefilter CLI entry point
//!
//! Parsing, configuration and dispatch all live in the CLI module; this
//! only reports the error and sets the exit status.

use typefilter::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
