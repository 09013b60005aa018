//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Demo user id the session starts logged in as
    pub default_user: String,
}

/// Message export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Whether the demo binary writes a message export on exit
    pub enabled: bool,
    /// Path of the exported JSON document
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "birdseed=debug")
    pub level: String,
    /// Output format ("pretty" or "json")
    pub format: String,
}

impl AppConfig {
    /// Load configuration from defaults, file, and environment
    ///
    /// # Priority (low to high)
    /// 1. Built-in defaults
    /// 2. config/default.toml
    /// 3. config/local.toml
    /// 4. BIRDSEED__* environment variables
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("session.default_user", "user-developer")?
            .set_default("export.enabled", false)?
            .set_default("export.path", "messages.json")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (BIRDSEED_*)
            .add_source(
                Environment::with_prefix("BIRDSEED")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.session.default_user.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "session.default_user must not be empty".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(crate::error::AppError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            session: SessionConfig {
                default_user: "user-developer".to_string(),
            },
            export: ExportConfig {
                enabled: false,
                path: PathBuf::from("messages.json"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_default_user() {
        let mut config = base_config();
        config.session.default_user = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_log_format() {
        let mut config = base_config();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
