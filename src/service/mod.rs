//! Service layer
//!
//! Contains the derived-state logic the presentation layer consumes:
//! profile pages, feed assembly, engagement toggles, message threads,
//! and notification bookkeeping. Services hold shared handles to the
//! store and the session and resolve everything by id on each call.

mod messages;
mod notifications;
mod profile;
mod timeline;
mod tweets;

pub use messages::{ExportedMessage, MessageService};
pub use notifications::NotificationService;
pub use profile::{Profile, ProfileService};
pub use timeline::TimelineService;
pub use tweets::{ToggleAction, TweetService};

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::data::Store;
use crate::error::{AppError, Result};
use crate::session::{Session, UserRef};

/// Shared handle to the entity store
pub type SharedStore = Arc<RwLock<Store>>;

/// Shared handle to the session
pub type SharedSession = Arc<RwLock<Session>>;

/// Acquire a read guard, recovering from poisoning
///
/// A poisoned lock only means some earlier caller panicked while
/// holding it; the store data itself is still usable.
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write guard, recovering from poisoning
pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Id of the active session user
pub(crate) fn current_user_id(session: &Session) -> Result<String> {
    session
        .current_user()
        .map(str::to_string)
        .ok_or(AppError::NotLoggedIn)
}

/// Resolve a user reference to a known user id
///
/// The sentinel goes through the session; a logged-out session is
/// reported as [`AppError::NotLoggedIn`] rather than a missing user.
pub(crate) fn resolve_user_id(store: &Store, session: &Session, user: &UserRef) -> Result<String> {
    if matches!(user, UserRef::Current) && !session.is_logged_in() {
        return Err(AppError::NotLoggedIn);
    }
    store
        .resolve_user(user, session)
        .map(|record| record.id.clone())
        .ok_or_else(|| AppError::UserNotFound(user.to_string()))
}

/// Reject empty (or whitespace-only) content, returning it trimmed
pub(crate) fn require_content(content: &str, what: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{what} content is required")));
    }
    Ok(trimmed.to_string())
}
