//! Application configuration
//!
//! Configuration is loaded with the `config` crate from defaults, optional
//! config files and `REDEMPTION__`-prefixed environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Backend API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the admin backend (e.g. "http://localhost:3000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token sent as a bearer token
    pub access_token: Option<String>,

    /// Acting admin user id, sent as `New-Api-User`
    pub user_id: Option<i64>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            user_id: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Quota display configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Quota units per currency unit
    #[serde(default = "default_quota_per_unit")]
    pub quota_per_unit: i64,

    /// Render quota as currency instead of raw units
    #[serde(default = "default_display_in_currency")]
    pub display_in_currency: bool,

    /// Message catalogue ("en" or "zh")
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_quota_per_unit() -> i64 {
    500_000
}

fn default_display_in_currency() -> bool {
    true
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            quota_per_unit: default_quota_per_unit(),
            display_in_currency: default_display_in_currency(),
            locale: default_locale(),
        }
    }
}

/// Code export configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Directory exported code files are written to
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .set_default("api.base_url", default_base_url())?
            .set_default("api.timeout_secs", default_timeout())?
            .set_default("display.quota_per_unit", default_quota_per_unit())?
            .set_default("display.display_in_currency", default_display_in_currency())?
            .set_default("display.locale", default_locale())?
            .set_default("export.directory", ".")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("REDEMPTION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("REDEMPTION").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_display_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.quota_per_unit, 500_000);
        assert!(config.display_in_currency);
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[api]\nbase_url = \"https://admin.example.com\"\nuser_id = 1").unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.api.user_id, Some(1));
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.access_token.is_none());
        assert_eq!(config.export.directory, PathBuf::from("."));
    }
}
