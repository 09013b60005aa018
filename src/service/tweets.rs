//! Tweet service
//!
//! Posting, replying, and the like/retweet toggles. The store's
//! mutation helpers are one-directional; the toggles here check
//! membership and invoke exactly one direction, all under a single
//! write guard so the check and the mutation cannot interleave.

use crate::data::{NewTweet, Tweet};
use crate::error::{AppError, Result};

use super::{SharedSession, SharedStore, current_user_id, read, require_content, write};

/// Which direction a toggle went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// The like/retweet was added
    Added,
    /// The like/retweet was removed
    Removed,
}

/// Tweet service
pub struct TweetService {
    store: SharedStore,
    session: SharedSession,
}

impl TweetService {
    /// Create new tweet service
    pub fn new(store: SharedStore, session: SharedSession) -> Self {
        Self { store, session }
    }

    /// Get a tweet by id
    pub fn get(&self, tweet_id: &str) -> Result<Tweet> {
        read(&self.store)
            .get_tweet(tweet_id)
            .cloned()
            .ok_or_else(|| AppError::TweetNotFound(tweet_id.to_string()))
    }

    /// Post a new top-level tweet as the current user
    pub fn post(&self, content: &str) -> Result<Tweet> {
        let content = require_content(content, "tweet")?;
        let author = current_user_id(&read(&self.session))?;
        let tweet = write(&self.store).create_tweet(NewTweet {
            content,
            author: author.clone(),
            reply_to: None,
        })?;
        tracing::info!(author = %author, tweet = %tweet.id, "Tweet posted");
        Ok(tweet)
    }

    /// Reply to a tweet as the current user
    pub fn reply(&self, tweet_id: &str, content: &str) -> Result<Tweet> {
        let content = require_content(content, "reply")?;
        let author = current_user_id(&read(&self.session))?;
        let reply = write(&self.store).create_tweet(NewTweet {
            content,
            author: author.clone(),
            reply_to: Some(tweet_id.to_string()),
        })?;
        tracing::info!(author = %author, parent = %tweet_id, reply = %reply.id, "Reply posted");
        Ok(reply)
    }

    /// Toggle the current user's like on a tweet
    pub fn toggle_like(&self, tweet_id: &str) -> Result<ToggleAction> {
        let user_id = current_user_id(&read(&self.session))?;
        let mut store = write(&self.store);
        let liked = store
            .get_tweet(tweet_id)
            .ok_or_else(|| AppError::TweetNotFound(tweet_id.to_string()))?
            .liked_by
            .iter()
            .any(|id| id == &user_id);

        let action = if liked {
            store.unlike_tweet(&user_id, tweet_id)?;
            ToggleAction::Removed
        } else {
            store.like_tweet(&user_id, tweet_id)?;
            ToggleAction::Added
        };
        tracing::debug!(user = %user_id, tweet = %tweet_id, ?action, "Like toggled");
        Ok(action)
    }

    /// Toggle the current user's retweet on a tweet
    pub fn toggle_retweet(&self, tweet_id: &str) -> Result<ToggleAction> {
        let user_id = current_user_id(&read(&self.session))?;
        let mut store = write(&self.store);
        let retweeted = store
            .get_tweet(tweet_id)
            .ok_or_else(|| AppError::TweetNotFound(tweet_id.to_string()))?
            .retweeted_by
            .iter()
            .any(|id| id == &user_id);

        let action = if retweeted {
            store.unretweet(&user_id, tweet_id)?;
            ToggleAction::Removed
        } else {
            store.retweet(&user_id, tweet_id)?;
            ToggleAction::Added
        };
        tracing::debug!(user = %user_id, tweet = %tweet_id, ?action, "Retweet toggled");
        Ok(action)
    }
}
