use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::filter::{FilterCriteria, DEFAULT_LOOKING_FOR, DEFAULT_TRADING_AWAY};

/// Main configuration structure
///
/// Loaded from the config file; the CLI layers env vars and flags on top.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub filters: FilterDefaults,
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        toml::from_str(contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to disk, returning where it went
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(config_path)
    }

    /// XDG config dir on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("swapshop");

        Ok(config_dir.join("config.toml"))
    }

    pub fn retry_config(&self) -> swapshop_api::RetryConfig {
        swapshop_api::RetryConfig {
            max_retries: self.retry.max_retries,
            initial_delay_ms: self.retry.initial_delay_ms,
            max_delay_ms: self.retry.max_delay_ms,
            ..swapshop_api::RetryConfig::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Marketplace backend root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User whose market is browsed
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    swapshop_api::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Tag selection the market screen starts with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDefaults {
    #[serde(default = "default_looking_for")]
    pub looking_for: Vec<String>,
    #[serde(default = "default_trading_away")]
    pub trading_away: Vec<String>,
}

fn default_looking_for() -> Vec<String> {
    DEFAULT_LOOKING_FOR.iter().map(|t| t.to_string()).collect()
}

fn default_trading_away() -> Vec<String> {
    DEFAULT_TRADING_AWAY.iter().map(|t| t.to_string()).collect()
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            looking_for: default_looking_for(),
            trading_away: default_trading_away(),
        }
    }
}

impl FilterDefaults {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.looking_for.clone(), self.trading_away.clone())
    }
}
