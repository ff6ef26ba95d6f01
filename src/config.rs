//! Configuration management for aggregate-prefixes.
//!
//! Settings come from an optional YAML file and can be overridden on the
//! command line:
//!
//! ```yaml
//! # Discard prefixes longer than this before aggregating (0-128)
//! max_length: 24
//! # Log every optimisation
//! verbose: true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::aggregator::{validate_max_length, DEFAULT_MAX_LENGTH};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Discard longer prefixes prior to processing
    pub max_length: i64,

    /// Report every optimisation
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file is not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_max_length(self.max_length)
            .with_context(|| format!("Invalid max_length '{}'", self.max_length))?;
        Ok(())
    }

    /// Apply command-line overrides on top of the file settings.
    pub fn with_overrides(mut self, max_length: Option<i64>, verbose: bool) -> Self {
        if let Some(max_length) = max_length {
            self.max_length = max_length;
        }
        self.verbose |= verbose;
        self
    }
}
