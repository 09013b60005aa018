//! E2E tests for notifications: derived filters, badges, reset

mod common;

use birdseed::data::{NewNotification, NotificationKind};
use birdseed::error::AppError;
use birdseed::session::UserRef;
use common::demo_app;

#[test]
fn test_notification_list_is_newest_first() {
    let app = demo_app();
    let notifications = app.notifications().for_user(&UserRef::Current).unwrap();

    assert_eq!(notifications.len(), 5);
    assert_eq!(notifications[0].id, "notif-5");
    assert_eq!(notifications[4].id, "notif-1");
    for pair in notifications.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[test]
fn test_full_feed_includes_the_follow_notification() {
    let app = demo_app();
    let feed = app.notifications().all();

    // The follow notification has no target tweet, so it is absent
    // from the developer's filtered list but present in the feed.
    assert_eq!(feed.len(), 6);
    assert_eq!(feed[0].id, "notif-5");
    assert_eq!(feed[5].id, "notif-2");
    for pair in feed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    let filtered = app.notifications().for_user(&UserRef::Current).unwrap();
    assert!(filtered.iter().all(|notif| notif.id != "notif-2"));
}

#[test]
fn test_unread_badge_tracks_read_flags() {
    let app = demo_app();
    let notifications = app.notifications();

    assert_eq!(notifications.unread_count(), 6);

    assert!(notifications.mark_read("notif-1").unwrap().is_applied());
    assert_eq!(notifications.unread_count(), 5);
    // Marking twice changes nothing
    assert!(!notifications.mark_read("notif-1").unwrap().is_applied());
    assert_eq!(notifications.unread_count(), 5);

    assert!(notifications.mark_unread("notif-1").unwrap().is_applied());
    assert_eq!(notifications.unread_count(), 6);
}

#[test]
fn test_reset_count_marks_everything_read() {
    let app = demo_app();
    let notifications = app.notifications();

    assert_eq!(notifications.reset_count(), 6);
    assert_eq!(notifications.unread_count(), 0);
    let all = notifications.for_user(&UserRef::Current).unwrap();
    assert!(all.iter().all(|notif| notif.read));

    // Nothing left to reset
    assert_eq!(notifications.reset_count(), 0);
}

#[test]
fn test_delete_notification() {
    let app = demo_app();
    let notifications = app.notifications();

    assert!(notifications.delete("notif-2").is_applied());
    assert!(!notifications.delete("notif-2").is_applied());

    assert_eq!(notifications.all().len(), 5);
    assert_eq!(notifications.unread_count(), 5);
}

#[test]
fn test_added_notification_reaches_the_target_author() {
    let app = demo_app();
    let notifications = app.notifications();

    let added = notifications
        .add(NewNotification {
            kind: NotificationKind::Like,
            actor: "user-designer".to_string(),
            target: Some("tweet-3".to_string()),
        })
        .unwrap();
    assert!(!added.read);
    assert_eq!(notifications.unread_count(), 7);

    // tweet-3 belongs to the manager, so the notification is theirs
    let manager = notifications
        .for_user(&UserRef::id("user-manager"))
        .unwrap();
    assert!(manager.iter().any(|notif| notif.id == added.id));
}

#[test]
fn test_add_requires_existing_target() {
    let app = demo_app();
    let err = app
        .notifications()
        .add(NewNotification {
            kind: NotificationKind::Like,
            actor: "user-designer".to_string(),
            target: Some("tweet-ghost".to_string()),
        })
        .unwrap_err();
    assert!(matches!(err, AppError::TweetNotFound(_)));
}

#[test]
fn test_follow_notifications_have_no_target() {
    let app = demo_app();
    let feed = app.notifications().all();
    let follow = feed
        .iter()
        .find(|notif| notif.kind == NotificationKind::Follow)
        .unwrap();
    assert!(follow.target.is_none());
    assert_eq!(follow.actor, "user-manager");

    // The actor sees their own follow entry through the filter.
    let manager = app
        .notifications()
        .for_user(&UserRef::id("user-manager"))
        .unwrap();
    assert!(manager.iter().any(|notif| notif.id == follow.id));
}
