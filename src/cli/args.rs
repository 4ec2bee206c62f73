//! CLI argument definitions using clap
//!
//! Commands:
//! - typefilter schema <TYPE> [--depth N] [--override-ignores]
//! - typefilter types
//! - typefilter query <TYPE> --data <path> [--request <path>]
//! - typefilter explain <TYPE> [--request <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::demo::DemoType;

/// typefilter - dynamic, type-driven filtering over typed records
#[derive(Parser, Debug)]
#[command(name = "typefilter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to engine configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the compiled schema of a demo type
    Schema {
        #[arg(value_enum)]
        r#type: DemoType,

        /// Depth budget (defaults to the configured depth)
        #[arg(long)]
        depth: Option<usize>,

        /// Include ignored types and fields
        #[arg(long)]
        override_ignores: bool,
    },

    /// List the types marked for compilation
    Types,

    /// Apply a filter request to a JSON array of demo items
    Query {
        #[arg(value_enum)]
        r#type: DemoType,

        /// JSON array of items
        #[arg(long)]
        data: PathBuf,

        /// Filter request (reads stdin when omitted)
        #[arg(long)]
        request: Option<PathBuf>,
    },

    /// Print the composed predicate of a filter request
    Explain {
        #[arg(value_enum)]
        r#type: DemoType,

        /// Filter request (reads stdin when omitted)
        #[arg(long)]
        request: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
