//! CLI-specific error types
//!
//! Every CLI error ends the command. Core rejections keep their own code.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::predicate::PredicateError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Filter(#[from] PredicateError),

    #[error("Empty input")]
    EmptyInput,

    #[error("Type '{0}' has no filterable schema")]
    SchemaUnavailable(String),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CLI_IO_ERROR",
            Self::Json(_) => "CLI_JSON_ERROR",
            Self::Config(_) => "CLI_CONFIG_ERROR",
            Self::Filter(e) => match e.as_coercion() {
                Some(coercion) => coercion.code().code(),
                None => e.code().code(),
            },
            Self::EmptyInput => "CLI_EMPTY_INPUT",
            Self::SchemaUnavailable(_) => "CLI_SCHEMA_UNAVAILABLE",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
