//! In-memory entity store
//!
//! All entity access goes through this module. The store owns the
//! canonical tables; every other component holds only ids and
//! re-resolves through the facade on each call.
//!
//! Mutations that touch more than one table (follow, like, retweet)
//! run as single transactional helpers so the relationship indices,
//! the embedded id sets, and the denormalized counters can never
//! diverge. Redundant mutations report [`Outcome::Unchanged`] instead
//! of silently no-oping or corrupting a counter.

use std::collections::HashMap;

use chrono::Utc;

use super::models::*;
use crate::error::{AppError, Result};
use crate::session::{Session, UserRef};

/// Whether a mutation changed anything
///
/// Lets callers distinguish "operation applied" from "already in that
/// state" without treating the latter as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation changed store state
    Applied,
    /// The store was already in the requested state
    Unchanged,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Remove the first occurrence of `id` from `list`
///
/// # Returns
/// true if an entry was removed
fn remove_id(list: &mut Vec<String>, id: &str) -> bool {
    match list.iter().position(|entry| entry == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

/// The canonical entity tables and relationship indices
///
/// Insertion order of the tables is irrelevant; read operations that
/// need an order sort explicitly.
#[derive(Debug, Default)]
pub struct Store {
    users: HashMap<String, User>,
    tweets: HashMap<String, Tweet>,
    messages: HashMap<String, Message>,
    notifications: HashMap<String, Notification>,
    /// user id -> ids of users following them
    followers: HashMap<String, Vec<String>>,
    /// user id -> ids of users they follow
    following: HashMap<String, Vec<String>>,
    /// tweet id -> ids of users who liked it (mirrors `Tweet::liked_by`)
    likes: HashMap<String, Vec<String>>,
    /// tweet id -> ids of users who retweeted it (mirrors `Tweet::retweeted_by`)
    retweets: HashMap<String, Vec<String>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Inserts (seed and fixtures)
    // =========================================================================

    /// Insert a fully-formed user record
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Insert a fully-formed tweet record
    ///
    /// This is the single construction point for the like/retweet
    /// indices: the index entries are derived from the embedded sets,
    /// and the denormalized counters are recomputed from them, so the
    /// counter invariant holds no matter what the record claimed.
    pub fn insert_tweet(&mut self, mut tweet: Tweet) {
        tweet.likes = tweet.liked_by.len() as u64;
        tweet.retweets = tweet.retweeted_by.len() as u64;
        if !tweet.liked_by.is_empty() {
            self.likes.insert(tweet.id.clone(), tweet.liked_by.clone());
        }
        if !tweet.retweeted_by.is_empty() {
            self.retweets
                .insert(tweet.id.clone(), tweet.retweeted_by.clone());
        }
        self.tweets.insert(tweet.id.clone(), tweet);
    }

    /// Insert a fully-formed message record
    pub fn insert_message(&mut self, message: Message) {
        self.messages.insert(message.id.clone(), message);
    }

    /// Insert a fully-formed notification record
    pub fn insert_notification(&mut self, notification: Notification) {
        self.notifications
            .insert(notification.id.clone(), notification);
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Get user by id
    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Resolve a user reference through the session
    ///
    /// [`UserRef::Current`] goes through the session pointer on every
    /// call; the resolution is never cached. Returns `None` when the
    /// session is logged out or the id is unknown.
    pub fn resolve_user(&self, user: &UserRef, session: &Session) -> Option<&User> {
        match user {
            UserRef::Current => self.get_user(session.current_user()?),
            UserRef::Id(id) => self.get_user(id),
        }
    }

    /// Get user by handle (exact match, linear scan)
    ///
    /// Handles are unique by seed convention, not enforced; the first
    /// match wins.
    pub fn get_user_by_handle(&self, handle: &str) -> Option<&User> {
        self.users.values().find(|user| user.handle == handle)
    }

    /// All users, unordered
    pub fn get_all_users(&self) -> Vec<&User> {
        self.users.values().collect()
    }

    /// Apply a partial profile edit
    ///
    /// # Returns
    /// The updated record
    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> Result<User> {
        let user = self
            .users
            .get_mut(id)
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(bio) = update.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = update.location {
            user.location = Some(location);
        }
        if let Some(website) = update.website {
            user.website = Some(website);
        }
        if let Some(avatar) = update.avatar {
            user.avatar = avatar;
        }
        if let Some(cover_image) = update.cover_image {
            user.cover_image = Some(cover_image);
        }

        Ok(user.clone())
    }

    // =========================================================================
    // Follow graph
    // =========================================================================

    /// Ids of users following `user_id` (empty when unknown)
    pub fn get_followers(&self, user_id: &str) -> &[String] {
        self.followers
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of users `user_id` follows (empty when unknown)
    pub fn get_following(&self, user_id: &str) -> &[String] {
        self.following
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Make `user_id` follow `target_id`
    ///
    /// Updates both sides of the follow graph and both denormalized
    /// counts in one step. Following someone already followed is
    /// [`Outcome::Unchanged`].
    pub fn follow_user(&mut self, user_id: &str, target_id: &str) -> Result<Outcome> {
        self.ensure_user(user_id)?;
        self.ensure_user(target_id)?;

        let following = self.following.entry(user_id.to_string()).or_default();
        if following.iter().any(|id| id == target_id) {
            return Ok(Outcome::Unchanged);
        }
        following.push(target_id.to_string());
        self.followers
            .entry(target_id.to_string())
            .or_default()
            .push(user_id.to_string());

        if let Some(user) = self.users.get_mut(user_id) {
            user.following_count += 1;
        }
        if let Some(target) = self.users.get_mut(target_id) {
            target.followers_count += 1;
        }

        Ok(Outcome::Applied)
    }

    /// Make `user_id` unfollow `target_id`
    ///
    /// Unfollowing someone never followed is [`Outcome::Unchanged`].
    pub fn unfollow_user(&mut self, user_id: &str, target_id: &str) -> Result<Outcome> {
        self.ensure_user(user_id)?;
        self.ensure_user(target_id)?;

        let removed = self
            .following
            .get_mut(user_id)
            .is_some_and(|list| remove_id(list, target_id));
        if !removed {
            return Ok(Outcome::Unchanged);
        }
        if let Some(list) = self.followers.get_mut(target_id) {
            remove_id(list, user_id);
        }

        if let Some(user) = self.users.get_mut(user_id) {
            user.following_count = user.following_count.saturating_sub(1);
        }
        if let Some(target) = self.users.get_mut(target_id) {
            target.followers_count = target.followers_count.saturating_sub(1);
        }

        Ok(Outcome::Applied)
    }

    // =========================================================================
    // Tweets
    // =========================================================================

    /// Get tweet by id
    pub fn get_tweet(&self, id: &str) -> Option<&Tweet> {
        self.tweets.get(id)
    }

    /// All tweets, unordered
    pub fn get_all_tweets(&self) -> Vec<&Tweet> {
        self.tweets.values().collect()
    }

    /// Tweets authored by `user_id`, unordered
    pub fn get_user_tweets(&self, user_id: &str) -> Vec<&Tweet> {
        self.tweets
            .values()
            .filter(|tweet| tweet.author == user_id)
            .collect()
    }

    /// Create a tweet (or reply) with a generated id
    ///
    /// A reply is linked at the front of its parent's reply list
    /// (most recent first).
    ///
    /// # Returns
    /// The full created record
    pub fn create_tweet(&mut self, data: NewTweet) -> Result<Tweet> {
        self.ensure_user(&data.author)?;
        if let Some(parent_id) = &data.reply_to {
            if !self.tweets.contains_key(parent_id) {
                return Err(AppError::TweetNotFound(parent_id.clone()));
            }
        }

        let tweet = Tweet {
            id: EntityId::new().0,
            content: data.content,
            author: data.author,
            replies: Vec::new(),
            likes: 0,
            liked_by: Vec::new(),
            retweets: 0,
            retweeted_by: Vec::new(),
            created_at: Utc::now(),
        };

        if let Some(parent_id) = &data.reply_to {
            if let Some(parent) = self.tweets.get_mut(parent_id) {
                parent.replies.insert(0, tweet.id.clone());
            }
        }

        self.tweets.insert(tweet.id.clone(), tweet.clone());
        Ok(tweet)
    }

    // =========================================================================
    // Likes and retweets
    // =========================================================================

    /// Ids of users who liked `tweet_id` (empty when unknown)
    pub fn get_tweet_likes(&self, tweet_id: &str) -> &[String] {
        self.likes.get(tweet_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of users who retweeted `tweet_id` (empty when unknown)
    pub fn get_tweet_retweets(&self, tweet_id: &str) -> &[String] {
        self.retweets
            .get(tweet_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Record a like
    ///
    /// Updates the index, the embedded set, and the counter in
    /// lockstep. Liking a tweet already liked is
    /// [`Outcome::Unchanged`]; double invocation cannot desynchronize
    /// the counter from the set.
    pub fn like_tweet(&mut self, user_id: &str, tweet_id: &str) -> Result<Outcome> {
        self.ensure_user(user_id)?;
        let tweet = self
            .tweets
            .get_mut(tweet_id)
            .ok_or_else(|| AppError::TweetNotFound(tweet_id.to_string()))?;

        if tweet.liked_by.iter().any(|id| id == user_id) {
            return Ok(Outcome::Unchanged);
        }
        tweet.liked_by.push(user_id.to_string());
        tweet.likes += 1;
        self.likes
            .entry(tweet_id.to_string())
            .or_default()
            .push(user_id.to_string());

        Ok(Outcome::Applied)
    }

    /// Remove a like
    pub fn unlike_tweet(&mut self, user_id: &str, tweet_id: &str) -> Result<Outcome> {
        self.ensure_user(user_id)?;
        let tweet = self
            .tweets
            .get_mut(tweet_id)
            .ok_or_else(|| AppError::TweetNotFound(tweet_id.to_string()))?;

        if !remove_id(&mut tweet.liked_by, user_id) {
            return Ok(Outcome::Unchanged);
        }
        tweet.likes = tweet.likes.saturating_sub(1);
        if let Some(list) = self.likes.get_mut(tweet_id) {
            remove_id(list, user_id);
        }

        Ok(Outcome::Applied)
    }

    /// Record a retweet
    ///
    /// Same lockstep discipline as [`Store::like_tweet`].
    pub fn retweet(&mut self, user_id: &str, tweet_id: &str) -> Result<Outcome> {
        self.ensure_user(user_id)?;
        let tweet = self
            .tweets
            .get_mut(tweet_id)
            .ok_or_else(|| AppError::TweetNotFound(tweet_id.to_string()))?;

        if tweet.retweeted_by.iter().any(|id| id == user_id) {
            return Ok(Outcome::Unchanged);
        }
        tweet.retweeted_by.push(user_id.to_string());
        tweet.retweets += 1;
        self.retweets
            .entry(tweet_id.to_string())
            .or_default()
            .push(user_id.to_string());

        Ok(Outcome::Applied)
    }

    /// Remove a retweet
    pub fn unretweet(&mut self, user_id: &str, tweet_id: &str) -> Result<Outcome> {
        self.ensure_user(user_id)?;
        let tweet = self
            .tweets
            .get_mut(tweet_id)
            .ok_or_else(|| AppError::TweetNotFound(tweet_id.to_string()))?;

        if !remove_id(&mut tweet.retweeted_by, user_id) {
            return Ok(Outcome::Unchanged);
        }
        tweet.retweets = tweet.retweets.saturating_sub(1);
        if let Some(list) = self.retweets.get_mut(tweet_id) {
            remove_id(list, user_id);
        }

        Ok(Outcome::Applied)
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Get message by id
    pub fn get_message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    /// All messages, unordered
    pub fn get_all_messages(&self) -> Vec<&Message> {
        self.messages.values().collect()
    }

    /// Messages where `user_id` is sender or recipient, unordered
    pub fn get_user_messages(&self, user_id: &str) -> Vec<&Message> {
        self.messages
            .values()
            .filter(|msg| msg.sender == user_id || msg.recipient == user_id)
            .collect()
    }

    /// Create a message with a generated id
    ///
    /// Threads are flat: when `parent_id` names a reply rather than a
    /// root, the stored parent is normalized to that reply's root, so
    /// every reply references the root directly.
    pub fn create_message(&mut self, data: NewMessage) -> Result<Message> {
        self.ensure_user(&data.sender)?;
        self.ensure_user(&data.recipient)?;

        let parent_id = match data.parent_id {
            Some(parent_id) => {
                let parent = self
                    .messages
                    .get(&parent_id)
                    .ok_or_else(|| AppError::MessageNotFound(parent_id.clone()))?;
                Some(parent.parent_id.clone().unwrap_or(parent_id))
            }
            None => None,
        };

        let message = Message {
            id: EntityId::new().0,
            content: data.content,
            sender: data.sender,
            recipient: data.recipient,
            created_at: Utc::now(),
            read: false,
            parent_id,
        };
        self.messages.insert(message.id.clone(), message.clone());
        Ok(message)
    }

    /// Set a message's read flag
    ///
    /// Already being in the requested state is [`Outcome::Unchanged`].
    pub fn set_message_read(&mut self, id: &str, read: bool) -> Result<Outcome> {
        let message = self
            .messages
            .get_mut(id)
            .ok_or_else(|| AppError::MessageNotFound(id.to_string()))?;
        if message.read == read {
            return Ok(Outcome::Unchanged);
        }
        message.read = read;
        Ok(Outcome::Applied)
    }

    /// Delete a message
    ///
    /// Deleting an absent id is [`Outcome::Unchanged`].
    pub fn delete_message(&mut self, id: &str) -> Outcome {
        match self.messages.remove(id) {
            Some(_) => Outcome::Applied,
            None => Outcome::Unchanged,
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Get notification by id
    pub fn get_notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.get(id)
    }

    /// All notifications, unordered
    pub fn get_all_notifications(&self) -> Vec<&Notification> {
        self.notifications.values().collect()
    }

    /// Notifications concerning `user_id`, unordered
    ///
    /// A notification concerns a user when they are the actor, or when
    /// they authored the tweet it targets. This is a derived filter
    /// recomputed on every read, not a maintained index.
    pub fn get_user_notifications(&self, user_id: &str) -> Vec<&Notification> {
        self.notifications
            .values()
            .filter(|notif| {
                notif.actor == user_id
                    || notif
                        .target
                        .as_deref()
                        .and_then(|target| self.tweets.get(target))
                        .is_some_and(|tweet| tweet.author == user_id)
            })
            .collect()
    }

    /// Create a notification with a generated id, initially unread
    pub fn create_notification(&mut self, data: NewNotification) -> Result<Notification> {
        self.ensure_user(&data.actor)?;
        if let Some(target) = &data.target {
            if !self.tweets.contains_key(target) {
                return Err(AppError::TweetNotFound(target.clone()));
            }
        }

        let notification = Notification {
            id: EntityId::new().0,
            kind: data.kind,
            actor: data.actor,
            target: data.target,
            created_at: Utc::now(),
            read: false,
        };
        self.notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    /// Set a notification's read flag
    pub fn set_notification_read(&mut self, id: &str, read: bool) -> Result<Outcome> {
        let notification = self
            .notifications
            .get_mut(id)
            .ok_or_else(|| AppError::NotificationNotFound(id.to_string()))?;
        if notification.read == read {
            return Ok(Outcome::Unchanged);
        }
        notification.read = read;
        Ok(Outcome::Applied)
    }

    /// Mark every notification read
    ///
    /// # Returns
    /// How many notifications were still unread
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut marked = 0;
        for notification in self.notifications.values_mut() {
            if !notification.read {
                notification.read = true;
                marked += 1;
            }
        }
        marked
    }

    /// Delete a notification
    pub fn delete_notification(&mut self, id: &str) -> Outcome {
        match self.notifications.remove(id) {
            Some(_) => Outcome::Applied,
            None => Outcome::Unchanged,
        }
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn ensure_user(&self, id: &str) -> Result<()> {
        if self.users.contains_key(id) {
            Ok(())
        } else {
            Err(AppError::UserNotFound(id.to_string()))
        }
    }
}
