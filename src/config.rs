use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prediction service HTTP server configuration
    pub server: ServerConfig,

    /// Classifier artifact configuration
    pub model: ModelConfig,

    /// Dashboard UI configuration
    pub ui: UiConfig,

    /// Launcher configuration
    #[serde(default)]
    pub launcher: LauncherConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the embedded defaults, an optional file named
    /// by `CONFIG_PATH`, and `REVIEW_SENTIMENT`-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        Self::load_from(&config_path)
    }

    /// Load configuration with an explicit override file path.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(config_path).required(false))
            // Override with environment variables (prefix: REVIEW_SENTIMENT)
            .add_source(
                config::Environment::with_prefix("REVIEW_SENTIMENT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Default tracing filter directives for the binaries. `RUST_LOG` still
    /// wins when set; the debug flag overrides the configured log level.
    pub fn log_filter(&self) -> String {
        let level = if self.server.debug {
            "debug"
        } else {
            self.observability.log_level.as_str()
        };
        format!("review_sentiment={level},tower_http={level}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_api_port")]
    pub port: u16,

    /// Debug mode (more verbose request logging)
    #[serde(default)]
    pub debug: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the serialized classifier artifact
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// Maximum review length in characters; longer inputs are truncated
    #[serde(default = "default_max_review_length")]
    pub max_review_length: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            max_review_length: default_max_review_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI server host
    #[serde(default = "default_ui_host")]
    pub host: String,

    /// UI server port
    #[serde(default = "default_ui_port")]
    pub port: u16,

    /// Base URL of the prediction API, used by the dashboard page
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path to the EDA dataset; synthetic data is used when absent
    #[serde(default = "default_eda_data_path")]
    pub eda_data_path: PathBuf,
}

impl UiConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Number of health-check attempts before giving up
    #[serde(default = "default_health_max_retries")]
    pub health_max_retries: u32,

    /// Delay between health-check attempts (seconds)
    #[serde(default = "default_health_retry_delay")]
    pub health_retry_delay_secs: u64,

    /// Delay before opening the browser (seconds)
    #[serde(default = "default_browser_delay")]
    pub browser_delay_secs: u64,

    /// Open the default browser at the UI address once everything is up
    #[serde(default = "default_true")]
    pub open_browser: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            health_max_retries: default_health_max_retries(),
            health_retry_delay_secs: default_health_retry_delay(),
            browser_delay_secs: default_browser_delay(),
            open_browser: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    5000
}

fn default_model_path() -> PathBuf {
    "data/model.bin".into()
}

fn default_max_review_length() -> usize {
    5000
}

fn default_ui_host() -> String {
    "127.0.0.1".to_string()
}

fn default_ui_port() -> u16 {
    8501
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_eda_data_path() -> PathBuf {
    "data/processed/eda_data.csv".into()
}

fn default_health_max_retries() -> u32 {
    10
}

fn default_health_retry_delay() -> u64 {
    1
}

fn default_browser_delay() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_api_port(), 5000);
        assert_eq!(default_ui_port(), 8501);
        assert_eq!(default_max_review_length(), 5000);
        assert_eq!(default_health_max_retries(), 10);
        assert_eq!(default_health_retry_delay(), 1);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn test_embedded_defaults_deserialize() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.ui.port, 8501);
        assert_eq!(config.model.max_review_length, 5000);
        assert_eq!(config.launcher.health_max_retries, 10);
        assert!(config.launcher.open_browser);
    }

    #[test]
    fn test_log_filter_honors_debug_flag() {
        let mut config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(
            config.log_filter(),
            "review_sentiment=info,tower_http=info"
        );

        config.server.debug = true;
        assert_eq!(
            config.log_filter(),
            "review_sentiment=debug,tower_http=debug"
        );

        config.server.debug = false;
        config.observability.log_level = "warn".to_string();
        assert_eq!(
            config.log_filter(),
            "review_sentiment=warn,tower_http=warn"
        );
    }

    #[test]
    fn test_bind_addrs() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
            debug: false,
        };
        assert_eq!(server.bind_addr(), "0.0.0.0:5000");

        let ui = UiConfig {
            host: "127.0.0.1".to_string(),
            port: 8501,
            api_url: default_api_url(),
            eda_data_path: default_eda_data_path(),
        };
        assert_eq!(ui.bind_addr(), "127.0.0.1:8501");
    }
}
