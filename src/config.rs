//! dotnet-extract configuration.
//!
//! Read from:
//! - Linux: ~/.config/dotnet-extract/config.toml
//! - macOS: ~/Library/Application Support/dotnet-extract/config.toml
//! - Windows: %APPDATA%\dotnet-extract\config.toml
//!
//! A missing file means defaults. Command-line flags override anything set
//! here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::detectors::idioms::FluentCatalog;
use crate::detectors::types::DEFAULT_MAX_NESTING_DEPTH;
use crate::error::{ExtractError, Result};
use crate::extract::{ExtractOptions, DEFAULT_LANGUAGE_VERSION};

/// Extractor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Value written to `languageVersion`
    #[serde(default = "default_language_version")]
    pub language_version: String,

    /// Types nested deeper than this are dropped. Values much above the
    /// default produce JSON that serde_json will not parse back.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,

    /// Fluent query method allowlist
    #[serde(default)]
    pub fluent: FluentConfig,
}

fn default_language_version() -> String {
    DEFAULT_LANGUAGE_VERSION.to_string()
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            language_version: default_language_version(),
            max_nesting_depth: default_max_nesting_depth(),
            fluent: FluentConfig::default(),
        }
    }
}

/// `[fluent]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluentConfig {
    /// Method names added to the allowlist
    #[serde(default)]
    pub extra_methods: Vec<String>,

    /// Use only `extra_methods`, dropping the built-in names
    #[serde(default)]
    pub replace_defaults: bool,
}

impl FluentConfig {
    pub fn catalog(&self) -> FluentCatalog {
        if self.replace_defaults {
            // A custom list is a different catalog; version 0 marks it as such
            FluentCatalog::new(0, self.extra_methods.iter().cloned())
        } else {
            FluentCatalog::default().extended(self.extra_methods.iter().cloned())
        }
    }
}

impl ExtractorConfig {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dotnet-extract").join("config.toml"))
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ExtractError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ExtractError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;

        if config.max_nesting_depth == 0 {
            return Err(ExtractError::Config {
                message: "max_nesting_depth must be at least 1".to_string(),
            });
        }
        Ok(config)
    }

    /// Extraction options for this configuration
    pub fn into_options(self) -> ExtractOptions {
        ExtractOptions {
            fluent: self.fluent.catalog(),
            language_version: self.language_version,
            max_nesting_depth: self.max_nesting_depth,
            analyzed_at: None,
        }
    }
}
