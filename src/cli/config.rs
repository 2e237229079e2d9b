//! Configuration file
//!
//! JSON, loaded once per command before anything else:
//!
//! ```json
//! { "schema_dir": "./schemas", "log_level": "info" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one `<table>.json` per table (required)
    pub schema_dir: String,

    /// Lowest log severity written to stderr (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.schema_dir.trim().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }

        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn or error.",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Returns the configured log severity
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }

    /// Resolves `schema_dir`; a relative path is taken relative to the
    /// directory of the config file
    pub fn schema_path(&self, config_path: &Path) -> PathBuf {
        let dir = Path::new(&self.schema_dir);
        if dir.is_absolute() {
            return dir.to_path_buf();
        }
        match config_path.parent() {
            Some(parent) => parent.join(dir),
            None => dir.to_path_buf(),
        }
    }
}
