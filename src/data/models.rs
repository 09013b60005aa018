//! Data models
//!
//! Rust structs representing the entity tables.
//! Generated IDs use ULID; seed IDs are fixed human-readable strings.
//! All timestamps use chrono.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Entity ID wrapper (ULID format, 26 characters)
///
/// Example: "01ARZ3NDEKTSV4RRFFQ69G5FAV"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generate a new ULID
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// User
// =============================================================================

/// A demo user profile
///
/// Seeded once at startup; mutated only through profile edits;
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique handle, used as a secondary lookup key
    pub handle: String,
    /// Avatar image URL
    pub avatar: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    /// Cover image URL
    pub cover_image: Option<String>,
    pub joined_date: DateTime<Utc>,
    /// Denormalized count, kept in lockstep with the follow graph
    pub followers_count: u64,
    /// Denormalized count, kept in lockstep with the follow graph
    pub following_count: u64,
}

/// Partial profile edit
///
/// `None` fields are left untouched. There is no way to clear an
/// optional field back to absent; the demo UI never needed one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
}

// =============================================================================
// Tweet
// =============================================================================

/// A post in the feed
///
/// Replies are structurally identical to top-level tweets; a tweet is
/// a reply exactly when some other tweet lists its id in `replies`.
///
/// Invariant (checked by the store's mutation helpers):
/// `likes == liked_by.len()` and `retweets == retweeted_by.len()`
/// after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    /// Text content; markdown-style links and hashtags are interpreted
    /// by the presentation layer, not stored specially
    pub content: String,
    /// Author user id
    pub author: String,
    /// Reply tweet ids, most recent first
    pub replies: Vec<String>,
    /// Denormalized like count
    pub likes: u64,
    /// Ids of users who liked this tweet
    pub liked_by: Vec<String>,
    /// Denormalized retweet count
    pub retweets: u64,
    /// Ids of users who retweeted this tweet
    pub retweeted_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a tweet or reply
#[derive(Debug, Clone)]
pub struct NewTweet {
    pub content: String,
    /// Author user id
    pub author: String,
    /// Id of the tweet this replies to, if any
    pub reply_to: Option<String>,
}

// =============================================================================
// Message
// =============================================================================

/// A direct message
///
/// Threads are flat and two-level: a root message has no `parent_id`,
/// and every reply references the root's id directly (never another
/// reply's id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    /// Sender user id
    pub sender: String,
    /// Recipient user id
    pub recipient: String,
    pub created_at: DateTime<Utc>,
    /// Whether the recipient has read this message
    pub read: bool,
    /// Id of the thread root, absent for root messages
    pub parent_id: Option<String>,
}

/// Payload for creating a message
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub content: String,
    pub sender: String,
    pub recipient: String,
    /// Thread root id; callers pass the root, not an arbitrary reply
    pub parent_id: Option<String>,
}

// =============================================================================
// Notification
// =============================================================================

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Follow,
    Reply,
    Retweet,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Follow => "follow",
            Self::Reply => "reply",
            Self::Retweet => "retweet",
        }
    }
}

/// Notification for user interactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    /// Id of the user who triggered this notification
    pub actor: String,
    /// Id of the tweet this concerns; absent for follow notifications
    pub target: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Whether the user has seen this
    pub read: bool,
}

/// Payload for creating a notification
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub actor: String,
    pub target: Option<String>,
}
