//! Store tests

use super::*;
use crate::error::AppError;
use crate::session::{Session, UserRef};
use chrono::Utc;

/// Helper to create a bare user record for fixtures
fn test_user(id: &str, handle: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {handle}"),
        handle: handle.to_string(),
        avatar: format!("https://example.com/{handle}.png"),
        bio: None,
        location: None,
        website: None,
        cover_image: None,
        joined_date: Utc::now(),
        followers_count: 0,
        following_count: 0,
    }
}

/// Helper to create a store with two unconnected users
fn two_user_store() -> Store {
    let mut store = Store::new();
    store.insert_user(test_user("techdev", "techdev"));
    store.insert_user(test_user("uidesigner", "uidesigner"));
    store
}

#[test]
fn test_get_user_and_handle_lookup_agree() {
    let store = demo_store().unwrap();

    let by_handle = store.get_user_by_handle("techdev").unwrap();
    let by_id = store.get_user(&by_handle.id).unwrap();
    assert_eq!(by_id.id, by_handle.id);
    assert_eq!(by_id.handle, "techdev");
    assert_eq!(by_id.name, by_handle.name);

    assert!(store.get_user_by_handle("nobody").is_none());
    assert!(store.get_user("user-nobody").is_none());
}

#[test]
fn test_resolve_user_goes_through_session() {
    let store = demo_store().unwrap();

    let session = Session::logged_in("user-developer");
    let resolved = store.resolve_user(&UserRef::Current, &session).unwrap();
    assert_eq!(resolved.id, "user-developer");

    // Literal ids ignore the session entirely
    let session = Session::logged_out();
    assert!(store.resolve_user(&UserRef::Current, &session).is_none());
    let resolved = store
        .resolve_user(&UserRef::id("user-designer"), &session)
        .unwrap();
    assert_eq!(resolved.id, "user-designer");
}

#[test]
fn test_follow_then_unfollow_restores_both_sides() {
    let mut store = two_user_store();

    let outcome = store.follow_user("techdev", "uidesigner").unwrap();
    assert!(outcome.is_applied());
    assert_eq!(store.get_following("techdev"), ["uidesigner".to_string()]);
    assert!(
        store
            .get_followers("uidesigner")
            .contains(&"techdev".to_string())
    );
    assert_eq!(store.get_user("techdev").unwrap().following_count, 1);
    assert_eq!(store.get_user("uidesigner").unwrap().followers_count, 1);

    let outcome = store.unfollow_user("techdev", "uidesigner").unwrap();
    assert!(outcome.is_applied());
    assert!(store.get_following("techdev").is_empty());
    assert!(store.get_followers("uidesigner").is_empty());
    assert_eq!(store.get_user("techdev").unwrap().following_count, 0);
    assert_eq!(store.get_user("uidesigner").unwrap().followers_count, 0);
}

#[test]
fn test_duplicate_follow_is_unchanged() {
    let mut store = two_user_store();

    assert!(store.follow_user("techdev", "uidesigner").unwrap().is_applied());
    let outcome = store.follow_user("techdev", "uidesigner").unwrap();
    assert_eq!(outcome, Outcome::Unchanged);

    // No duplicate entries, no double-counting
    assert_eq!(store.get_following("techdev").len(), 1);
    assert_eq!(store.get_followers("uidesigner").len(), 1);
    assert_eq!(store.get_user("uidesigner").unwrap().followers_count, 1);
}

#[test]
fn test_unfollow_never_followed_is_unchanged() {
    let mut store = two_user_store();
    let outcome = store.unfollow_user("techdev", "uidesigner").unwrap();
    assert_eq!(outcome, Outcome::Unchanged);
}

#[test]
fn test_follow_unknown_user_is_an_error() {
    let mut store = two_user_store();
    let err = store.follow_user("techdev", "ghost").unwrap_err();
    assert!(matches!(err, AppError::UserNotFound(id) if id == "ghost"));
}

#[test]
fn test_create_tweet_then_lookup_yields_identical_record() {
    let mut store = two_user_store();

    let created = store
        .create_tweet(NewTweet {
            content: "Hello, feed!".to_string(),
            author: "techdev".to_string(),
            reply_to: None,
        })
        .unwrap();

    let fetched = store.get_tweet(&created.id).unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.content, "Hello, feed!");
    assert_eq!(fetched.author, "techdev");
    assert_eq!(fetched.likes, 0);
    assert!(fetched.liked_by.is_empty());
    assert_eq!(fetched.created_at, created.created_at);
}

#[test]
fn test_reply_links_at_front_of_parent() {
    let mut store = two_user_store();

    let parent = store
        .create_tweet(NewTweet {
            content: "Parent".to_string(),
            author: "techdev".to_string(),
            reply_to: None,
        })
        .unwrap();
    let first = store
        .create_tweet(NewTweet {
            content: "First reply".to_string(),
            author: "uidesigner".to_string(),
            reply_to: Some(parent.id.clone()),
        })
        .unwrap();
    let second = store
        .create_tweet(NewTweet {
            content: "Second reply".to_string(),
            author: "techdev".to_string(),
            reply_to: Some(parent.id.clone()),
        })
        .unwrap();

    // Most recent first
    let parent = store.get_tweet(&parent.id).unwrap();
    assert_eq!(parent.replies, vec![second.id.clone(), first.id.clone()]);
}

#[test]
fn test_reply_to_missing_tweet_is_an_error() {
    let mut store = two_user_store();
    let err = store
        .create_tweet(NewTweet {
            content: "Orphan".to_string(),
            author: "techdev".to_string(),
            reply_to: Some("tweet-ghost".to_string()),
        })
        .unwrap_err();
    assert!(matches!(err, AppError::TweetNotFound(_)));
}

#[test]
fn test_like_unlike_round_trip() {
    let mut store = demo_store().unwrap();

    // user-researcher has not liked tweet-3 in the seed
    let before = store.get_tweet("tweet-3").unwrap().clone();
    assert!(!before.liked_by.contains(&"user-researcher".to_string()));

    assert!(
        store
            .like_tweet("user-researcher", "tweet-3")
            .unwrap()
            .is_applied()
    );
    let liked = store.get_tweet("tweet-3").unwrap();
    assert_eq!(liked.likes, before.likes + 1);
    assert_eq!(liked.likes, liked.liked_by.len() as u64);
    assert_eq!(
        store.get_tweet_likes("tweet-3").len(),
        liked.liked_by.len()
    );

    assert!(
        store
            .unlike_tweet("user-researcher", "tweet-3")
            .unwrap()
            .is_applied()
    );
    let after = store.get_tweet("tweet-3").unwrap();
    assert_eq!(after.likes, before.likes);
    assert_eq!(after.liked_by, before.liked_by);
    assert!(!after.liked_by.contains(&"user-researcher".to_string()));
}

#[test]
fn test_double_like_cannot_desynchronize_counter() {
    let mut store = demo_store().unwrap();

    assert!(
        store
            .like_tweet("user-researcher", "tweet-3")
            .unwrap()
            .is_applied()
    );
    assert_eq!(
        store.like_tweet("user-researcher", "tweet-3").unwrap(),
        Outcome::Unchanged
    );

    let tweet = store.get_tweet("tweet-3").unwrap();
    assert_eq!(tweet.likes, tweet.liked_by.len() as u64);
    assert_eq!(
        tweet
            .liked_by
            .iter()
            .filter(|id| *id == "user-researcher")
            .count(),
        1
    );
}

#[test]
fn test_unlike_never_liked_is_unchanged() {
    let mut store = demo_store().unwrap();
    let before = store.get_tweet("tweet-3").unwrap().clone();
    assert_eq!(
        store.unlike_tweet("user-researcher", "tweet-3").unwrap(),
        Outcome::Unchanged
    );
    let after = store.get_tweet("tweet-3").unwrap();
    assert_eq!(after.likes, before.likes);
    assert_eq!(after.liked_by, before.liked_by);
}

#[test]
fn test_retweet_round_trip() {
    let mut store = demo_store().unwrap();

    // user-cto has not retweeted tweet-4 in the seed
    let before = store.get_tweet("tweet-4").unwrap().clone();
    assert!(!before.retweeted_by.contains(&"user-cto".to_string()));

    assert!(store.retweet("user-cto", "tweet-4").unwrap().is_applied());
    let retweeted = store.get_tweet("tweet-4").unwrap();
    assert_eq!(retweeted.retweets, before.retweets + 1);
    assert_eq!(retweeted.retweets, retweeted.retweeted_by.len() as u64);

    assert!(store.unretweet("user-cto", "tweet-4").unwrap().is_applied());
    let after = store.get_tweet("tweet-4").unwrap();
    assert_eq!(after.retweets, before.retweets);
    assert_eq!(after.retweeted_by, before.retweeted_by);
}

#[test]
fn test_like_missing_tweet_is_an_error() {
    let mut store = demo_store().unwrap();
    let err = store.like_tweet("user-developer", "tweet-ghost").unwrap_err();
    assert!(matches!(err, AppError::TweetNotFound(_)));
}

#[test]
fn test_update_user_merges_partial_fields() {
    let mut store = two_user_store();

    let updated = store
        .update_user(
            "techdev",
            UserUpdate {
                bio: Some("New bio".to_string()),
                location: Some("Portland, OR".to_string()),
                ..UserUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.bio.as_deref(), Some("New bio"));
    assert_eq!(updated.location.as_deref(), Some("Portland, OR"));
    // Untouched fields survive
    assert_eq!(updated.handle, "techdev");
    assert_eq!(updated.name, "User techdev");
}

#[test]
fn test_message_thread_is_rerooted_and_flat() {
    let mut store = two_user_store();

    let root = store
        .create_message(NewMessage {
            content: "Root".to_string(),
            sender: "techdev".to_string(),
            recipient: "uidesigner".to_string(),
            parent_id: None,
        })
        .unwrap();
    assert_eq!(root.parent_id, None);

    let reply = store
        .create_message(NewMessage {
            content: "Reply".to_string(),
            sender: "uidesigner".to_string(),
            recipient: "techdev".to_string(),
            parent_id: Some(root.id.clone()),
        })
        .unwrap();
    assert_eq!(reply.parent_id.as_deref(), Some(root.id.as_str()));

    // Replying to the reply still references the root directly
    let nested = store
        .create_message(NewMessage {
            content: "Nested".to_string(),
            sender: "techdev".to_string(),
            recipient: "uidesigner".to_string(),
            parent_id: Some(reply.id.clone()),
        })
        .unwrap();
    assert_eq!(nested.parent_id.as_deref(), Some(root.id.as_str()));
}

#[test]
fn test_message_read_flag_and_delete() {
    let mut store = demo_store().unwrap();

    assert!(store.set_message_read("msg-1", true).unwrap().is_applied());
    assert_eq!(
        store.set_message_read("msg-1", true).unwrap(),
        Outcome::Unchanged
    );
    assert!(store.set_message_read("msg-1", false).unwrap().is_applied());

    assert_eq!(store.delete_message("msg-1"), Outcome::Applied);
    assert!(store.get_message("msg-1").is_none());
    assert_eq!(store.delete_message("msg-1"), Outcome::Unchanged);

    let err = store.set_message_read("msg-1", true).unwrap_err();
    assert!(matches!(err, AppError::MessageNotFound(_)));
}

#[test]
fn test_user_notifications_are_a_derived_filter() {
    let store = demo_store().unwrap();

    // Five seeded notifications target developer-authored tweets; the
    // follow notification has no target, so it matches only its actor.
    let developer = store.get_user_notifications("user-developer");
    assert_eq!(developer.len(), 5);
    assert!(developer.iter().all(|n| n.id != "notif-2"));

    let manager = store.get_user_notifications("user-manager");
    assert!(manager.iter().any(|n| n.id == "notif-2"));

    // The researcher triggered nothing and authored no targeted tweet.
    assert!(store.get_user_notifications("user-researcher").is_empty());

    // Actors see their own entries.
    let designer = store.get_user_notifications("user-designer");
    assert!(designer.iter().any(|n| n.id == "notif-1"));
}

#[test]
fn test_mark_all_notifications_read() {
    let mut store = demo_store().unwrap();

    assert_eq!(store.mark_all_notifications_read(), 6);
    assert!(store.get_all_notifications().iter().all(|n| n.read));
    // Second pass finds nothing unread
    assert_eq!(store.mark_all_notifications_read(), 0);
}

#[test]
fn test_seed_satisfies_counter_invariants() {
    let store = demo_store().unwrap();

    for tweet in store.get_all_tweets() {
        assert_eq!(tweet.likes, tweet.liked_by.len() as u64, "tweet {}", tweet.id);
        assert_eq!(
            tweet.retweets,
            tweet.retweeted_by.len() as u64,
            "tweet {}",
            tweet.id
        );
        assert_eq!(
            store.get_tweet_likes(&tweet.id),
            tweet.liked_by.as_slice(),
            "likes index for {}",
            tweet.id
        );
        assert_eq!(
            store.get_tweet_retweets(&tweet.id),
            tweet.retweeted_by.as_slice(),
            "retweets index for {}",
            tweet.id
        );
        for reply_id in &tweet.replies {
            assert!(store.get_tweet(reply_id).is_some(), "dangling reply {reply_id}");
        }
    }
}

#[test]
fn test_seed_follow_graph_is_symmetric() {
    let store = demo_store().unwrap();

    for user in store.get_all_users() {
        for followee in store.get_following(&user.id) {
            assert!(
                store.get_followers(followee).contains(&user.id),
                "{} follows {followee} but is not in their followers",
                user.id
            );
        }
        assert_eq!(
            user.following_count,
            store.get_following(&user.id).len() as u64
        );
        assert_eq!(
            user.followers_count,
            store.get_followers(&user.id).len() as u64
        );
    }
}

#[test]
fn test_seed_references_resolve() {
    let store = demo_store().unwrap();

    for message in store.get_all_messages() {
        assert!(store.get_user(&message.sender).is_some());
        assert!(store.get_user(&message.recipient).is_some());
    }
    for notification in store.get_all_notifications() {
        assert!(store.get_user(&notification.actor).is_some());
        if let Some(target) = &notification.target {
            assert!(store.get_tweet(target).is_some(), "dangling target {target}");
        }
    }

    // Handles are unique
    let mut handles: Vec<&str> = store
        .get_all_users()
        .iter()
        .map(|user| user.handle.as_str())
        .collect();
    handles.sort_unstable();
    handles.dedup();
    assert_eq!(handles.len(), store.get_all_users().len());
}
