//! Birdseed - an in-memory social-feed data layer with seeded demo content
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Presentation (external)                      │
//! │  - Feed, profile, messaging, and notification views         │
//! │  - Holds ids only; re-resolves through the services         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Feed assembly, threads, unread counts                    │
//! │  - Engagement toggles, message export                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - In-memory entity tables and relationship indices         │
//! │  - Seeded demo dataset                                      │
//! │  - Session pointer                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `data`: entity models, the store facade, and the seed dataset
//! - `service`: derived-state logic consumed by the presentation layer
//! - `session`: the simulated login state machine
//! - `config`: configuration management
//! - `error`: error types

pub mod config;
pub mod data;
pub mod error;
pub mod service;
pub mod session;

use std::sync::{Arc, RwLock};

use service::{
    MessageService, NotificationService, ProfileService, SharedSession, SharedStore,
    TimelineService, TweetService,
};

/// Application state shared across all consumers
///
/// Holds the configuration, the entity store, and the session. The
/// store is mutated in place behind a lock so every multi-step
/// mutation is atomic from a caller's perspective.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// The canonical entity store
    pub store: SharedStore,

    /// The active session
    pub session: SharedSession,
}

impl AppState {
    /// Initialize application state with the seeded demo dataset
    ///
    /// Starts logged in as the configured default demo user.
    ///
    /// # Errors
    /// Returns an error if the default user is not part of the seed.
    pub fn new(config: config::AppConfig) -> error::Result<Self> {
        let store = data::demo_store()?;
        let default_user = config.session.default_user.clone();
        if store.get_user(&default_user).is_none() {
            return Err(error::AppError::Config(format!(
                "session.default_user names unknown user: {default_user}"
            )));
        }

        tracing::info!(default_user = %default_user, "Application state initialized");
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
            session: Arc::new(RwLock::new(session::Session::logged_in(default_user))),
        })
    }

    /// Initialize application state over a caller-provided store
    ///
    /// Starts logged out; used by fixtures that build their own data.
    pub fn with_store(config: config::AppConfig, store: data::Store) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
            session: Arc::new(RwLock::new(session::Session::logged_out())),
        }
    }

    // =========================================================================
    // Session transitions
    // =========================================================================

    /// Log in as a demo user
    ///
    /// # Errors
    /// Returns `UserNotFound` for an unknown id; the session is left
    /// untouched in that case.
    pub fn login(&self, user_id: &str) -> error::Result<()> {
        if service::read(&self.store).get_user(user_id).is_none() {
            return Err(error::AppError::UserNotFound(user_id.to_string()));
        }
        service::write(&self.session).login(user_id);
        tracing::info!(user = %user_id, "Logged in");
        Ok(())
    }

    /// Log out
    ///
    /// # Returns
    /// The previously active user id, if there was one.
    pub fn logout(&self) -> Option<String> {
        let previous = service::write(&self.session).logout();
        if let Some(user) = &previous {
            tracing::info!(user = %user, "Logged out");
        }
        previous
    }

    /// Id of the active session user, if any
    pub fn current_user(&self) -> Option<String> {
        service::read(&self.session)
            .current_user()
            .map(str::to_string)
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Profile service over this state
    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(self.store.clone(), self.session.clone())
    }

    /// Tweet service over this state
    pub fn tweets(&self) -> TweetService {
        TweetService::new(self.store.clone(), self.session.clone())
    }

    /// Timeline service over this state
    pub fn timelines(&self) -> TimelineService {
        TimelineService::new(self.store.clone(), self.session.clone())
    }

    /// Message service over this state
    pub fn messages(&self) -> MessageService {
        MessageService::new(self.store.clone(), self.session.clone())
    }

    /// Notification service over this state
    pub fn notifications(&self) -> NotificationService {
        NotificationService::new(self.store.clone(), self.session.clone())
    }
}
