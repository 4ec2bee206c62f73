//! CLI module for typefilter
//!
//! Provides command-line interface for:
//! - schema: Print a compiled type schema
//! - types: List registered types
//! - query: Filter, order and page a JSON data file
//! - explain: Render the predicate a filter request composes to

mod args;
mod commands;
mod errors;
mod io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EngineConfig;
use crate::schema::registry;

pub use args::{Cli, Command};
pub use commands::{explain, query, run_command, schema, types};
pub use errors::{CliError, CliResult};
pub use io::{read_input, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments, installs logging and the global registry, then
/// dispatches. This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.log_json);

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let registry = registry::init(config)?;
    crate::demo::register(registry);

    run_command(registry, cli.command)
}

/// Installs the log subscriber, writing to stderr
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env("TYPEFILTER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::registry().with(filter);
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
