//! Process settings
//!
//! Runtime knobs read from the environment (and `.env`): request timeouts,
//! CORS and logging. Provider endpoints and credentials live in `AppConfig`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main process settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Upper bound for a single upstream lookup, in seconds
    pub timeout: u64,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request: RequestConfig { timeout: 15 },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
                cors_enabled: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }
}

impl Settings {
    /// Create a new settings instance from the environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            request: RequestConfig {
                timeout: get_env_or_default("REQUEST_TIMEOUT", "15")
                    .parse()
                    .context("Invalid request timeout")?,
            },
            security: SecurityConfig {
                allowed_origins: get_env_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get_env_or_default("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.request.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        // RUST_LOG may carry directives like "milecount=debug,tower_http=info"
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        let is_directive = self.logging.level.contains('=') || self.logging.level.contains(',');
        if !is_directive && !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Upstream lookup timeout
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.request.timeout)
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.lookup_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_log_directives_accepted() {
        let mut settings = Settings::default();
        settings.logging.level = "milecount=debug,tower_http=info".to_string();
        assert!(settings.validate().is_ok());

        settings.logging.level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut settings = Settings::default();
        settings.request.timeout = 0;
        assert!(settings.validate().is_err());
    }
}
