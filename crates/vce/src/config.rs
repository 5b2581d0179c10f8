//! Engine configuration
//!
//! Loads [`EngineConfig`] from defaults, an optional TOML file and
//! `VCE_`-prefixed environment variables, later sources overriding
//! earlier ones.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use vce_domain::error::Result;

use crate::error_ext::ErrorContext;

/// Default environment variable prefix
pub const CONFIG_ENV_PREFIX: &str = "VCE";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "vce.toml";

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Directory relative module references resolve against when a
    /// level does not set its own base directory
    pub base_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Emit JSON-formatted events instead of human-readable ones
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration loader service
#[derive(Clone, Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Create a loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Load configuration from all sources
    ///
    /// Merge order (later overrides earlier):
    /// 1. `EngineConfig::default()`
    /// 2. TOML file (explicit path, or `vce.toml` in the working directory)
    /// 3. Environment variables, nested with a double underscore so
    ///    snake_case field names stay addressable (e.g.
    ///    `VCE_LOGGING__LEVEL=debug`, `VCE_LOGGING__JSON_FORMAT=true`)
    pub fn load(&self) -> Result<EngineConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(EngineConfig::default()));

        let path = self
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
        if path.exists() {
            figment = figment.merge(Toml::file(&path));
        }

        let prefix = self.env_prefix.as_deref().unwrap_or(CONFIG_ENV_PREFIX);
        figment = figment.merge(Env::prefixed(&format!("{prefix}_")).split("__"));

        let config: EngineConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        crate::logging::parse_log_level(&config.logging.level)?;
        Ok(config)
    }
}
