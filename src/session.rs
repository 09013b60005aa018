//! Session state
//!
//! A single simulated session stands in for real authentication.
//! Two states: logged out, or logged in as one of the demo users.
//! Current-user-scoped queries resolve through this on every call;
//! nothing caches the resolution across a login boundary.

use std::fmt;

/// The active session
///
/// There is exactly one session per process. It is not persisted;
/// a restart begins again at the configured default demo user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// No active user; "my" views have no subject
    LoggedOut,
    /// Logged in as the named demo user
    LoggedIn {
        /// Id of the active user
        user_id: String,
    },
}

impl Session {
    /// Create a logged-out session
    pub fn logged_out() -> Self {
        Self::LoggedOut
    }

    /// Create a session already logged in as `user_id`
    ///
    /// Existence of the user is checked by the caller
    /// (see `AppState::login`), not here.
    pub fn logged_in(user_id: impl Into<String>) -> Self {
        Self::LoggedIn {
            user_id: user_id.into(),
        }
    }

    /// Id of the active user, if any
    pub fn current_user(&self) -> Option<&str> {
        match self {
            Self::LoggedOut => None,
            Self::LoggedIn { user_id } => Some(user_id),
        }
    }

    /// Whether a user is logged in
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    /// Transition to LoggedIn as `user_id`
    pub fn login(&mut self, user_id: impl Into<String>) {
        *self = Self::logged_in(user_id);
    }

    /// Transition to LoggedOut
    ///
    /// # Returns
    /// The previously active user id, if there was one.
    pub fn logout(&mut self) -> Option<String> {
        match std::mem::replace(self, Self::LoggedOut) {
            Self::LoggedOut => None,
            Self::LoggedIn { user_id } => Some(user_id),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::LoggedOut
    }
}

/// A user reference accepted by current-user-scoped operations
///
/// Replaces the magic `"current-user"` string id: the sentinel is a
/// typed variant, and resolving it always goes through the [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    /// The user named by the active session
    Current,
    /// A literal user id
    Id(String),
}

impl UserRef {
    /// Reference a literal user id
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("<current user>"),
            Self::Id(id) => f.write_str(id),
        }
    }
}
