//! Error types for Birdseed
//!
//! All errors in the crate are converted to `AppError`. Lookup misses
//! surface as explicit `*NotFound` values, never panics; redundant
//! mutations are not errors at all (see [`crate::data::Outcome`]).

use thiserror::Error;

/// Application-wide error type
///
/// This enum represents all possible errors that can occur
/// in the data layer and the services built on top of it.
#[derive(Debug, Error)]
pub enum AppError {
    /// No user with this id (or handle) exists
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// No tweet with this id exists
    #[error("tweet not found: {0}")]
    TweetNotFound(String),

    /// No message with this id exists
    #[error("message not found: {0}")]
    MessageNotFound(String),

    /// No notification with this id exists
    #[error("notification not found: {0}")]
    NotificationNotFound(String),

    /// A current-user-scoped operation was invoked while logged out
    #[error("no active session")]
    NotLoggedIn,

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization error (message export)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error (message export)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
