use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Upstream recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Number of random recipes shown on the "all recipes" view
    #[serde(default = "default_random_batch_size")]
    pub random_batch_size: usize,
    /// Number of random recipes shown on the featured strip
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
    /// File backing the persistent key-value store
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            random_batch_size: default_random_batch_size(),
            featured_count: default_featured_count(),
            storage_path: default_storage_path(),
        }
    }
}

/// Configuration for the upstream recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds; 0 disables the timeout
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_random_batch_size() -> usize {
    8
}

fn default_featured_count() -> usize {
    5
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("recipe-browser.json")
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BROWSER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BROWSER__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`BrowserConfig::load`] for the precedence rules.
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

// Use double underscore for nested: RECIPE_BROWSER__API__TIMEOUT
fn environment() -> Environment {
    Environment::with_prefix("RECIPE_BROWSER")
        .separator("__")
        .try_parsing(true)
}
