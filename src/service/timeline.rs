//! Timeline service
//!
//! Feed assembly: the home feed, per-user feeds, and reply threads.
//! Read-only; consumes the store facade and sorts explicitly since
//! table order is meaningless.

use crate::data::{Store, Tweet};
use crate::error::{AppError, Result};
use crate::session::UserRef;

use super::{SharedSession, SharedStore, read, resolve_user_id};

/// Sort newest first; ids break timestamp ties deterministically
fn sort_newest_first(tweets: &mut [Tweet]) {
    tweets.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Ids of every tweet that appears in some reply list
fn reply_ids(store: &Store) -> std::collections::HashSet<String> {
    store
        .get_all_tweets()
        .iter()
        .flat_map(|tweet| tweet.replies.iter().cloned())
        .collect()
}

/// Timeline service
pub struct TimelineService {
    store: SharedStore,
    session: SharedSession,
}

impl TimelineService {
    /// Create new timeline service
    pub fn new(store: SharedStore, session: SharedSession) -> Self {
        Self { store, session }
    }

    /// Get the home feed
    ///
    /// Top-level tweets only (anything referenced as a reply is shown
    /// inside its thread instead), newest first.
    pub fn home_timeline(&self) -> Vec<Tweet> {
        let store = read(&self.store);
        let replies = reply_ids(&store);
        let mut tweets: Vec<Tweet> = store
            .get_all_tweets()
            .into_iter()
            .filter(|tweet| !replies.contains(&tweet.id))
            .cloned()
            .collect();
        sort_newest_first(&mut tweets);
        tweets
    }

    /// Get a user's feed (their tweets and replies), newest first
    pub fn user_timeline(&self, user: &UserRef) -> Result<Vec<Tweet>> {
        let store = read(&self.store);
        let session = read(&self.session);
        let user_id = resolve_user_id(&store, &session, user)?;
        let mut tweets: Vec<Tweet> = store
            .get_user_tweets(&user_id)
            .into_iter()
            .cloned()
            .collect();
        sort_newest_first(&mut tweets);
        Ok(tweets)
    }

    /// Get a tweet's thread: the tweet followed by its replies
    ///
    /// Replies come back in stored order (most recent first).
    /// Dangling reply ids are skipped rather than reported.
    pub fn thread(&self, tweet_id: &str) -> Result<Vec<Tweet>> {
        let store = read(&self.store);
        let root = store
            .get_tweet(tweet_id)
            .cloned()
            .ok_or_else(|| AppError::TweetNotFound(tweet_id.to_string()))?;
        let mut thread = Vec::with_capacity(root.replies.len() + 1);
        let replies = root.replies.clone();
        thread.push(root);
        for reply_id in &replies {
            if let Some(reply) = store.get_tweet(reply_id) {
                thread.push(reply.clone());
            }
        }
        Ok(thread)
    }
}
