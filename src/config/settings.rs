//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::error::ConfigError;

/// Default base URL of the Dynamic Mockups REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://app.dynamicmockups.com/api/v1";

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Upstream API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "api.base_url must start with http:// or https://, got '{}'",
                    self.api.base_url
                ),
            });
        }

        if self.http.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "http.port must be non-zero".to_string(),
            });
        }

        for origin in &self.http.allowed_origins {
            if origin.is_empty() || origin.chars().any(char::is_whitespace) {
                return Err(ConfigError::ValidationError {
                    message: format!("invalid entry in http.allowed_origins: '{origin}'"),
                });
            }
        }

        Ok(())
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Process-wide fallback API key.
    ///
    /// Used when an invocation carries no credential of its own. The
    /// `DYNAMIC_MOCKUPS_API_KEY` environment variable and the `--api-key`
    /// CLI flag both override this value.
    #[serde(default)]
    pub key: Option<String>,

    /// Base URL of the upstream API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional endpoint for fire-and-forget usage reports.
    ///
    /// When absent, usage reporting is disabled.
    #[serde(default)]
    pub usage_endpoint: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            base_url: default_base_url(),
            usage_endpoint: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Interface to bind the HTTP transport to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP transport to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed for cross-origin requests.
    ///
    /// An empty list allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert!(config.api.key.is_none());
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "api": {
                "key": "dm_test_key",
                "base_url": "https://staging.dynamicmockups.example/api/v1",
                "usage_endpoint": "https://telemetry.example/usage"
            },
            "http": {
                "host": "0.0.0.0",
                "port": 8080,
                "allowed_origins": ["https://studio.example.com"]
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.key.as_deref(), Some("dm_test_key"));
        assert_eq!(
            config.api.base_url,
            "https://staging.dynamicmockups.example/api/v1"
        );
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 8080);
        assert_eq!(
            config.http.allowed_origins,
            vec!["https://studio.example.com".to_string()]
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn http_config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_non_http_base_url() {
        let json = r#"{
            "api": {
                "base_url": "ftp://mockups.example"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_port() {
        let json = r#"{
            "http": {
                "port": 0
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_whitespace_origin() {
        let json = r#"{
            "http": {
                "allowed_origins": ["https://a.example", "not an origin"]
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
