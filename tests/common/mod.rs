//! Common test utilities for E2E tests

use std::path::PathBuf;

use birdseed::{AppState, config};

/// Test configuration with the default demo session user
pub fn test_config() -> config::AppConfig {
    config::AppConfig {
        session: config::SessionConfig {
            default_user: "user-developer".to_string(),
        },
        export: config::ExportConfig {
            enabled: false,
            path: PathBuf::from("messages.json"),
        },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}

/// A seeded application, logged in as the default demo user
pub fn demo_app() -> AppState {
    AppState::new(test_config()).unwrap()
}
