//! Profile service
//!
//! Profile pages, profile edits, and the follow graph.

use crate::data::{Outcome, User, UserUpdate};
use crate::error::{AppError, Result};
use crate::session::UserRef;

use super::{SharedSession, SharedStore, current_user_id, read, resolve_user_id, write};

/// A profile page: the user plus their resolved follow lists
///
/// Follower and followee records are cloned at read time; holding a
/// `Profile` across a mutation shows stale data, not torn data.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub followers: Vec<User>,
    pub following: Vec<User>,
}

/// Profile service
pub struct ProfileService {
    store: SharedStore,
    session: SharedSession,
}

impl ProfileService {
    /// Create new profile service
    pub fn new(store: SharedStore, session: SharedSession) -> Self {
        Self { store, session }
    }

    /// Get a profile page for a user reference
    pub fn profile(&self, user: &UserRef) -> Result<Profile> {
        let store = read(&self.store);
        let session = read(&self.session);
        let user_id = resolve_user_id(&store, &session, user)?;
        self.assemble(&store, &user_id)
    }

    /// Get a profile page by handle
    pub fn profile_by_handle(&self, handle: &str) -> Result<Profile> {
        let store = read(&self.store);
        let user_id = store
            .get_user_by_handle(handle)
            .map(|user| user.id.clone())
            .ok_or_else(|| AppError::UserNotFound(handle.to_string()))?;
        self.assemble(&store, &user_id)
    }

    fn assemble(&self, store: &crate::data::Store, user_id: &str) -> Result<Profile> {
        let user = store
            .get_user(user_id)
            .cloned()
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;
        let resolve_all = |ids: &[String]| {
            ids.iter()
                .filter_map(|id| store.get_user(id))
                .cloned()
                .collect::<Vec<_>>()
        };
        Ok(Profile {
            followers: resolve_all(store.get_followers(user_id)),
            following: resolve_all(store.get_following(user_id)),
            user,
        })
    }

    /// Edit the current user's profile
    pub fn update_profile(&self, update: UserUpdate) -> Result<User> {
        let user_id = current_user_id(&read(&self.session))?;
        let updated = write(&self.store).update_user(&user_id, update)?;
        tracing::info!(user = %user_id, "Profile updated");
        Ok(updated)
    }

    /// Follow a user as the current user
    ///
    /// Self-follows are rejected; following someone already followed
    /// reports [`Outcome::Unchanged`].
    pub fn follow(&self, target: &UserRef) -> Result<Outcome> {
        let mut store = write(&self.store);
        let session = read(&self.session);
        let user_id = current_user_id(&session)?;
        let target_id = resolve_user_id(&store, &session, target)?;
        if user_id == target_id {
            return Err(AppError::Validation(
                "cannot follow yourself".to_string(),
            ));
        }
        let outcome = store.follow_user(&user_id, &target_id)?;
        tracing::info!(user = %user_id, target = %target_id, applied = outcome.is_applied(), "Follow");
        Ok(outcome)
    }

    /// Unfollow a user as the current user
    pub fn unfollow(&self, target: &UserRef) -> Result<Outcome> {
        let mut store = write(&self.store);
        let session = read(&self.session);
        let user_id = current_user_id(&session)?;
        let target_id = resolve_user_id(&store, &session, target)?;
        let outcome = store.unfollow_user(&user_id, &target_id)?;
        tracing::info!(user = %user_id, target = %target_id, applied = outcome.is_applied(), "Unfollow");
        Ok(outcome)
    }
}
