use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Environment prefix; `__` separates sections (`CINEMATCH_API__BASE_URL`).
pub const ENV_PREFIX: &str = "CINEMATCH_";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub images: ImageConfig,
    pub tui: TuiConfig,
    pub data: DataConfig,
}

/// Recommendation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service root; the recommendation path is appended to it.
    pub base_url: String,
    /// Results requested per server page (`count`).
    pub page_size: u32,
    /// Request timeout in seconds. `0` waits forever.
    pub timeout_secs: u64,
}

/// Poster image host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Prefix joined with a movie's `poster_path`.
    pub base_url: String,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
    /// Log filter directive (e.g. `debug`, `cinematch=trace`).
    pub log_filter: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            page_size: 12,
            timeout_secs: 30,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://image.tmdb.org/t/p/w200".to_string(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

impl AppConfig {
    /// Defaults, then `path` (if it exists), then the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("cinematch"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("cinematch").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
