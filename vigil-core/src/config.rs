//! Configuration management for Vigil
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (VIGIL_*)
//! 3. Config file (~/.config/vigil/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Reasoning-model configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,

    /// Model used for diff analysis
    pub model: String,

    /// Sampling temperature; 0 keeps the analysis deterministic
    pub temperature: f32,

    /// Timeout for a single analysis request
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Checkpoint database configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database; `None` uses the default cache path
    pub path: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Reasoning-model configuration
    pub llm: LlmConfig,

    /// Checkpoint database configuration
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/vigil/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vigil").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - VIGIL_BASE_URL: OpenAI-compatible endpoint
    /// - VIGIL_MODEL: Model to use for analysis
    /// - VIGIL_DB: Checkpoint database path
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("VIGIL_BASE_URL") {
            self.llm.base_url = base_url;
        }

        if let Ok(model) = std::env::var("VIGIL_MODEL") {
            self.llm.model = model;
        }

        if let Ok(db_path) = std::env::var("VIGIL_DB") {
            self.database.path = Some(PathBuf::from(db_path));
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        base_url: Option<String>,
        model: Option<String>,
        db_path: Option<PathBuf>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.llm.base_url = base_url;
        }

        if let Some(model) = model {
            self.llm.model = model;
        }

        if let Some(path) = db_path {
            self.database.path = Some(path);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        base_url: Option<String>,
        model: Option<String>,
        db_path: Option<PathBuf>,
    ) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(base_url, model, db_path))
    }
}
