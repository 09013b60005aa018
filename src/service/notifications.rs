//! Notification service
//!
//! The notification feed, the unread badge count, and read-state
//! bookkeeping. The per-user list is a derived filter over the table
//! (actor, or author of the targeted tweet), recomputed on each read;
//! the full feed lists the whole table, which is where targetless
//! follow notifications appear.

use crate::data::{NewNotification, Notification, Outcome};
use crate::error::Result;
use crate::session::UserRef;

use super::{SharedSession, SharedStore, read, resolve_user_id, write};

/// Notification service
pub struct NotificationService {
    store: SharedStore,
    session: SharedSession,
}

impl NotificationService {
    /// Create new notification service
    pub fn new(store: SharedStore, session: SharedSession) -> Self {
        Self { store, session }
    }

    /// The whole notification table, newest first
    ///
    /// This is the demo notification page: one shared feed for the
    /// single simulated session. Follow notifications carry no target
    /// tweet, so they show up here and in the badge count but not in
    /// anyone's [`NotificationService::for_user`] list except their
    /// actor's.
    pub fn all(&self) -> Vec<Notification> {
        let store = read(&self.store);
        let mut notifications: Vec<Notification> = store
            .get_all_notifications()
            .into_iter()
            .cloned()
            .collect();
        notifications.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        notifications
    }

    /// Notifications concerning a user, newest first
    pub fn for_user(&self, user: &UserRef) -> Result<Vec<Notification>> {
        let store = read(&self.store);
        let session = read(&self.session);
        let user_id = resolve_user_id(&store, &session, user)?;
        let mut notifications: Vec<Notification> = store
            .get_user_notifications(&user_id)
            .into_iter()
            .cloned()
            .collect();
        notifications.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(notifications)
    }

    /// Unread notifications across the whole table
    ///
    /// The badge count is table-wide, matching the one-session demo
    /// model; [`NotificationService::reset_count`] drives it to zero.
    pub fn unread_count(&self) -> usize {
        read(&self.store)
            .get_all_notifications()
            .into_iter()
            .filter(|notif| !notif.read)
            .count()
    }

    /// Record a new notification, initially unread
    pub fn add(&self, data: NewNotification) -> Result<Notification> {
        let notification = write(&self.store).create_notification(data)?;
        tracing::debug!(
            notification = %notification.id,
            kind = notification.kind.as_str(),
            actor = %notification.actor,
            "Notification added"
        );
        Ok(notification)
    }

    /// Mark a notification read
    pub fn mark_read(&self, notification_id: &str) -> Result<Outcome> {
        write(&self.store).set_notification_read(notification_id, true)
    }

    /// Mark a notification unread
    pub fn mark_unread(&self, notification_id: &str) -> Result<Outcome> {
        write(&self.store).set_notification_read(notification_id, false)
    }

    /// Delete a notification
    pub fn delete(&self, notification_id: &str) -> Outcome {
        write(&self.store).delete_notification(notification_id)
    }

    /// Mark every notification read, zeroing the badge count
    ///
    /// # Returns
    /// How many notifications were still unread
    pub fn reset_count(&self) -> usize {
        let marked = write(&self.store).mark_all_notifications_read();
        if marked > 0 {
            tracing::info!(marked, "Notifications reset");
        }
        marked
    }
}
