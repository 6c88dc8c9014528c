use crate::api::DEFAULT_BASE_URL;
use crate::error::{NixSearchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = "nix-search";

pub const DEFAULT_CHANNEL: &str = "unstable";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NixSearchConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub default_channel: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl NixSearchConfig {
    pub fn load(config_home: &Path) -> Result<Self> {
        let config_path = config_home.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            log::debug!("Config file not found at {config_path:?}, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: NixSearchConfig = toml::from_str(&contents)
            .map_err(|e| NixSearchError::ConfigError(format!("Failed to parse config.toml: {e}")))?;

        log::debug!("Loaded config from {config_path:?}");
        Ok(config)
    }

    pub fn save(&self, config_home: &Path) -> Result<()> {
        let config_path = config_home.join(CONFIG_FILE_NAME);

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| NixSearchError::ConfigError(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, contents)?;
        log::debug!("Saved config to {config_path:?}");
        Ok(())
    }

    /// The channel to search when none is given on the command line.
    pub fn channel(&self) -> &str {
        self.default_channel.as_deref().unwrap_or(DEFAULT_CHANNEL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }
}

/// Resolve the directory holding config.toml.
pub fn config_home() -> Result<PathBuf> {
    // Check NIX_SEARCH_HOME environment variable first
    if let Ok(home) = std::env::var("NIX_SEARCH_HOME") {
        let path = PathBuf::from(home);
        if path.is_absolute() {
            return Ok(path);
        }
    }

    // Fall back to the platform config directory
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| {
            NixSearchError::ConfigError("Unable to determine config directory".to_string())
        })
}

/// Load the configuration from the resolved config home.
pub fn load_config() -> Result<NixSearchConfig> {
    NixSearchConfig::load(&config_home()?)
}
