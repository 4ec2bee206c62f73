//! Engine configuration
//!
//! Loaded once from a JSON file (or defaulted) and handed to the
//! registry, predicate builder and query applicator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Schema registry already initialized")]
    AlreadyInitialized,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Depth budget used when a caller does not supply one (default: 3)
    #[serde(default = "default_max_depth")]
    pub default_max_depth: usize,

    /// Include ignored types and fields in compiled schemas (default: false)
    #[serde(default)]
    pub override_ignores: bool,

    /// Separator for InSequence arguments when none is given (default: ",")
    #[serde(default = "default_sequence_separator")]
    pub sequence_separator: String,

    /// Largest page a request may ask for (default: 1000)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Page size used when a request omits one (default: 50)
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_max_depth() -> usize {
    3
}

fn default_sequence_separator() -> String {
    ",".to_string()
}

fn default_max_page_size() -> usize {
    1000
}

fn default_page_size() -> usize {
    50
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_max_depth: default_max_depth(),
            override_ignores: false,
            sequence_separator: default_sequence_separator(),
            max_page_size: default_max_page_size(),
            default_page_size: default_page_size(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values and their relationships
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_max_depth == 0 {
            return Err(ConfigError::Invalid("default_max_depth must be > 0".into()));
        }

        if self.sequence_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "sequence_separator must not be empty".into(),
            ));
        }

        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid("max_page_size must be > 0".into()));
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "default_page_size must be between 1 and {}",
                self.max_page_size
            )));
        }

        Ok(())
    }
}
