//! Seeded demo dataset
//!
//! Six demo users, their tweet/reply graph, a handful of direct
//! messages, and the notification table. Five of the six seeded
//! notifications target tweets authored by the default demo user;
//! the follow notification surfaces through the full feed and the
//! badge count rather than the per-user filter.
//!
//! The dataset is constructed through the store's own mutation path
//! where one exists (the follow graph), and through `insert_tweet`'s
//! normalizing constructor otherwise, so the counter and index
//! invariants hold before the first read.

use chrono::{DateTime, TimeZone, Utc};

use super::models::{Message, Notification, NotificationKind, Tweet, User};
use super::store::Store;
use crate::error::Result;

/// Build a store populated with the demo dataset
pub fn demo_store() -> Result<Store> {
    let mut store = Store::new();

    for user in demo_users() {
        store.insert_user(user);
    }
    // Counters are maintained by follow_user, so the seeded
    // follower/following counts match the graph by construction.
    for (user_id, targets) in FOLLOW_GRAPH {
        for target_id in *targets {
            store.follow_user(user_id, target_id)?;
        }
    }
    for tweet in demo_tweets() {
        store.insert_tweet(tweet);
    }
    for message in demo_messages() {
        store.insert_message(message);
    }
    for notification in demo_notifications() {
        store.insert_notification(notification);
    }

    tracing::debug!(
        users = store.get_all_users().len(),
        tweets = store.get_all_tweets().len(),
        messages = store.get_all_messages().len(),
        notifications = store.get_all_notifications().len(),
        "Seeded demo dataset"
    );

    Ok(store)
}

/// Who follows whom: user id -> followees
const FOLLOW_GRAPH: &[(&str, &[&str])] = &[
    (
        "user-developer",
        &[
            "user-designer",
            "user-manager",
            "user-researcher",
            "user-engineer",
            "user-cto",
        ],
    ),
    (
        "user-designer",
        &[
            "user-developer",
            "user-manager",
            "user-researcher",
            "user-engineer",
            "user-cto",
        ],
    ),
    (
        "user-manager",
        &["user-developer", "user-designer", "user-researcher", "user-cto"],
    ),
    (
        "user-researcher",
        &[
            "user-developer",
            "user-designer",
            "user-manager",
            "user-engineer",
            "user-cto",
        ],
    ),
    (
        "user-engineer",
        &["user-developer", "user-manager", "user-researcher", "user-cto"],
    ),
    (
        "user-cto",
        &[
            "user-developer",
            "user-designer",
            "user-manager",
            "user-researcher",
            "user-engineer",
        ],
    ),
];

/// Calendar constant for the fixed seed timeline
fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, minute, 0)
        .single()
        .expect("valid seed timestamp")
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|id| id.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    name: &str,
    handle: &str,
    avatar: &str,
    bio: &str,
    location: &str,
    website: &str,
    cover_image: &str,
    joined: DateTime<Utc>,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        handle: handle.to_string(),
        avatar: avatar.to_string(),
        bio: Some(bio.to_string()),
        location: Some(location.to_string()),
        website: Some(website.to_string()),
        cover_image: Some(cover_image.to_string()),
        joined_date: joined,
        // Filled in by the follow graph pass
        followers_count: 0,
        following_count: 0,
    }
}

fn demo_users() -> Vec<User> {
    vec![
        user(
            "user-developer",
            "Tech Developer",
            "techdev",
            "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop",
            "Full-stack developer passionate about React, TypeScript, and cloud technologies",
            "San Francisco, CA",
            "https://techdev.codes",
            "https://images.unsplash.com/photo-1557683316-973673baf926?w=1200&h=400&fit=crop",
            at(1, 1, 0, 0),
        ),
        user(
            "user-designer",
            "UI Designer",
            "uidesigner",
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=100&h=100&fit=crop",
            "UI/UX designer creating beautiful and intuitive interfaces",
            "New York, NY",
            "https://designer.portfolio",
            "https://images.unsplash.com/photo-1558591710-4b4a1ae0f04d?w=1200&h=400&fit=crop",
            at(1, 1, 0, 0),
        ),
        user(
            "user-manager",
            "Product Manager",
            "prodmgr",
            "https://images.unsplash.com/photo-1599566150163-29194dcaad36?w=100&h=100&fit=crop",
            "Product Manager bridging the gap between users and technology",
            "Seattle, WA",
            "https://product.manager",
            "https://images.unsplash.com/photo-1557425955-df376b5903c8?w=1200&h=400&fit=crop",
            at(1, 1, 0, 0),
        ),
        user(
            "user-researcher",
            "UX Researcher",
            "uxresearch",
            "https://images.unsplash.com/photo-1573497019940-1c28c88b4f3e?w=100&h=100&fit=crop",
            "User research specialist. Making products more human-centered through data-driven insights 📊",
            "Boston, MA",
            "https://uxresearch.blog",
            "https://images.unsplash.com/photo-1553028826-f4804a6dba3b?w=1200&h=400&fit=crop",
            at(2, 15, 0, 0),
        ),
        user(
            "user-engineer",
            "DevOps Engineer",
            "devopsmaster",
            "https://images.unsplash.com/photo-1607990281513-2c110a25bd8c?w=100&h=100&fit=crop",
            "Infrastructure & automation enthusiast. CI/CD pipeline wizard 🔧",
            "Austin, TX",
            "https://devops.tech",
            "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?w=1200&h=400&fit=crop",
            at(2, 1, 0, 0),
        ),
        user(
            "user-cto",
            "Tech Leader",
            "techlead",
            "https://images.unsplash.com/photo-1556157382-97eda2d62296?w=100&h=100&fit=crop",
            "CTO | Building the future of tech | Open source advocate | Speaker 🚀",
            "Silicon Valley",
            "https://techleader.blog",
            "https://images.unsplash.com/photo-1451187580459-43490279c0fa?w=1200&h=400&fit=crop",
            at(1, 1, 0, 0),
        ),
    ]
}

fn tweet(
    id: &str,
    author: &str,
    content: &str,
    created_at: DateTime<Utc>,
    liked_by: &[&str],
    retweeted_by: &[&str],
    replies: &[&str],
) -> Tweet {
    Tweet {
        id: id.to_string(),
        content: content.to_string(),
        author: author.to_string(),
        replies: ids(replies),
        // Normalized from the sets by insert_tweet
        likes: 0,
        liked_by: ids(liked_by),
        retweets: 0,
        retweeted_by: ids(retweeted_by),
        created_at,
    }
}

fn demo_tweets() -> Vec<Tweet> {
    vec![
        tweet(
            "tweet-url-1",
            "user-designer",
            "Check out our new design system documentation! [Bolt Design System](https://boltdesign.dev) 📚 #design #documentation",
            at(3, 17, 9, 0),
            &["user-developer", "user-manager", "user-researcher", "user-engineer", "user-cto"],
            &["user-developer", "user-engineer", "user-cto"],
            &["reply-url-3", "reply-url-2", "reply-url-1"],
        ),
        tweet(
            "reply-url-1",
            "user-developer",
            "Love the new documentation! The interactive examples at [component playground](https://boltdesign.dev/playground) are especially helpful 👏",
            at(3, 17, 10, 30),
            &["user-designer", "user-manager"],
            &["user-designer"],
            &[],
        ),
        tweet(
            "reply-url-2",
            "user-researcher",
            "The accessibility guidelines are comprehensive. This will help us maintain consistency across all our products.",
            at(3, 17, 11, 15),
            &["user-designer", "user-developer"],
            &["user-developer"],
            &[],
        ),
        tweet(
            "reply-url-3",
            "user-cto",
            "Great work on the dark mode implementation! The color system adapts beautifully.",
            at(3, 17, 12, 0),
            &["user-designer", "user-developer", "user-manager"],
            &["user-developer", "user-manager"],
            &[],
        ),
        tweet(
            "tweet-url-2",
            "user-engineer",
            "Just published a blog post about our Kubernetes migration journey! [Read it here](https://techblog.bolt.dev/k8s-migration) 🚀 Featuring performance metrics and lessons learned #devops #kubernetes",
            at(3, 17, 8, 0),
            &["user-developer", "user-cto", "user-manager", "user-designer"],
            &["user-developer", "user-cto", "user-manager"],
            &["reply-url-6", "reply-url-5", "reply-url-4"],
        ),
        tweet(
            "reply-url-4",
            "user-cto",
            "Excellent write-up! The section about handling stateful sets was particularly insightful.",
            at(3, 17, 13, 30),
            &["user-engineer", "user-developer", "user-manager"],
            &["user-developer", "user-manager"],
            &[],
        ),
        tweet(
            "reply-url-5",
            "user-developer",
            "Would love to see a follow-up post about your monitoring setup! [Our setup](https://techblog.bolt.dev/monitoring) has some similarities.",
            at(3, 17, 14, 15),
            &["user-engineer", "user-cto", "user-manager"],
            &["user-engineer", "user-manager"],
            &[],
        ),
        tweet(
            "reply-url-6",
            "user-manager",
            "The performance improvements are impressive! How are you handling database migrations?",
            at(3, 17, 15, 0),
            &["user-engineer", "user-developer"],
            &["user-developer"],
            &[],
        ),
        tweet(
            "tweet-6",
            "user-cto",
            "Excited to announce our new tech strategy! Focus on AI, blockchain, and sustainable computing for 2024. Thread below... 🧵 #innovation #tech",
            at(3, 16, 10, 0),
            &["user-developer", "user-designer", "user-manager", "user-researcher", "user-engineer"],
            &["user-developer", "user-manager", "user-engineer"],
            &["reply-31", "reply-30"],
        ),
        tweet(
            "reply-30",
            "user-engineer",
            "The sustainable computing focus is crucial. Our current infrastructure optimizations align perfectly with this.",
            at(3, 16, 14, 30),
            &["user-researcher", "user-cto", "user-manager"],
            &["user-cto", "user-manager"],
            &[],
        ),
        tweet(
            "reply-31",
            "user-researcher",
            "The AI features will need robust testing. I can help set up a comprehensive test plan.",
            at(3, 16, 16, 5),
            &["user-engineer", "user-cto", "user-manager", "user-developer"],
            &["user-manager", "user-developer"],
            &[],
        ),
        tweet(
            "tweet-3",
            "user-manager",
            "Product roadmap review went great! Excited about our upcoming features 📈 #product #management",
            at(3, 15, 11, 0),
            &["user-developer", "user-designer", "user-engineer", "user-cto"],
            &["user-designer", "user-engineer", "user-cto"],
            &["reply-29"],
        ),
        tweet(
            "reply-29",
            "user-engineer",
            "Impressive results! Would love to hear more about your monitoring setup.",
            at(3, 15, 14, 20),
            &["user-manager", "user-cto", "user-developer"],
            &["user-developer"],
            &[],
        ),
        tweet(
            "tweet-4",
            "user-researcher",
            "Just wrapped up a fascinating user research session. The insights we gathered will revolutionize our onboarding flow! 🧪 #UX #research",
            at(3, 14, 9, 30),
            &["user-designer", "user-manager", "user-developer"],
            &["user-designer", "user-manager"],
            &[],
        ),
        tweet(
            "tweet-5",
            "user-engineer",
            "Successfully migrated our entire infrastructure to Kubernetes. Deployment time reduced by 70%! 🎉 #devops #k8s",
            at(3, 13, 8, 45),
            &["user-developer", "user-manager", "user-researcher"],
            &["user-developer", "user-manager"],
            &["reply-33", "reply-32"],
        ),
        tweet(
            "reply-32",
            "user-developer",
            "This will be a great case study for our tech blog. The community would love to learn from this.",
            at(3, 13, 13, 45),
            &["user-cto", "user-manager", "user-engineer", "user-researcher"],
            &["user-cto", "user-engineer"],
            &[],
        ),
        tweet(
            "reply-33",
            "user-researcher",
            "The reduced deployment time will help us iterate faster on our UX improvements. Win-win! 🎯",
            at(3, 13, 16, 30),
            &["user-cto", "user-engineer", "user-manager", "user-developer"],
            &["user-manager", "user-engineer"],
            &[],
        ),
    ]
}

fn message(
    id: &str,
    sender: &str,
    recipient: &str,
    content: &str,
    created_at: DateTime<Utc>,
    read: bool,
) -> Message {
    Message {
        id: id.to_string(),
        content: content.to_string(),
        sender: sender.to_string(),
        recipient: recipient.to_string(),
        created_at,
        read,
        parent_id: None,
    }
}

fn demo_messages() -> Vec<Message> {
    vec![
        message(
            "msg-1",
            "user-developer",
            "user-designer",
            "Hey! Love your latest design work. Would you be interested in collaborating?",
            at(3, 15, 10, 30),
            false,
        ),
        message(
            "msg-2",
            "user-manager",
            "user-developer",
            "Let's discuss the new feature requirements tomorrow.",
            at(3, 14, 15, 45),
            true,
        ),
        message(
            "msg-3",
            "user-researcher",
            "user-manager",
            "I have some interesting user research data to share about the new features.",
            at(3, 15, 9, 15),
            false,
        ),
        message(
            "msg-4",
            "user-engineer",
            "user-developer",
            "Can we review the deployment pipeline changes next week?",
            at(3, 14, 16, 30),
            true,
        ),
        message(
            "msg-5",
            "user-cto",
            "user-developer",
            "Your recent contributions to the frontend modernization have been outstanding. Let's discuss your career growth.",
            at(3, 16, 9, 30),
            false,
        ),
    ]
}

fn notification(
    id: &str,
    kind: NotificationKind,
    actor: &str,
    target: Option<&str>,
    created_at: DateTime<Utc>,
) -> Notification {
    Notification {
        id: id.to_string(),
        kind,
        actor: actor.to_string(),
        target: target.map(|t| t.to_string()),
        created_at,
        read: false,
    }
}

fn demo_notifications() -> Vec<Notification> {
    vec![
        notification(
            "notif-1",
            NotificationKind::Like,
            "user-designer",
            Some("reply-url-1"),
            at(3, 17, 11, 30),
        ),
        notification(
            "notif-2",
            NotificationKind::Follow,
            "user-manager",
            None,
            at(3, 15, 10, 15),
        ),
        notification(
            "notif-3",
            NotificationKind::Reply,
            "user-designer",
            Some("reply-url-5"),
            at(3, 17, 14, 40),
        ),
        notification(
            "notif-4",
            NotificationKind::Like,
            "user-manager",
            Some("reply-url-5"),
            at(3, 17, 14, 45),
        ),
        notification(
            "notif-5",
            NotificationKind::Retweet,
            "user-engineer",
            Some("reply-url-5"),
            at(3, 17, 17, 20),
        ),
        notification(
            "notif-6",
            NotificationKind::Reply,
            "user-cto",
            Some("reply-url-1"),
            at(3, 17, 12, 0),
        ),
    ]
}
