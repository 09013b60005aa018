//! Message service
//!
//! Direct messages: inbox assembly, flat thread reconstruction,
//! read flags, deletion, and the JSON export.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::{Message, NewMessage, Outcome};
use crate::error::{AppError, Result};
use crate::session::UserRef;

use super::{SharedSession, SharedStore, current_user_id, read, require_content, resolve_user_id, write};

/// One message in the export document
///
/// Field names follow the export format: camelCase keys, RFC 3339
/// `createdAt`, `parentId` omitted for root messages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedMessage {
    pub id: String,
    pub content: String,
    pub sender: String,
    pub recipient: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl From<&Message> for ExportedMessage {
    fn from(msg: &Message) -> Self {
        Self {
            id: msg.id.clone(),
            content: msg.content.clone(),
            sender: msg.sender.clone(),
            recipient: msg.recipient.clone(),
            created_at: msg.created_at,
            read: msg.read,
            parent_id: msg.parent_id.clone(),
        }
    }
}

/// Message service
pub struct MessageService {
    store: SharedStore,
    session: SharedSession,
}

impl MessageService {
    /// Create new message service
    pub fn new(store: SharedStore, session: SharedSession) -> Self {
        Self { store, session }
    }

    /// Get a message by id
    pub fn get(&self, message_id: &str) -> Result<Message> {
        read(&self.store)
            .get_message(message_id)
            .cloned()
            .ok_or_else(|| AppError::MessageNotFound(message_id.to_string()))
    }

    /// Messages where the user is sender or recipient, newest first
    pub fn inbox(&self, user: &UserRef) -> Result<Vec<Message>> {
        let store = read(&self.store);
        let session = read(&self.session);
        let user_id = resolve_user_id(&store, &session, user)?;
        let mut messages: Vec<Message> = store
            .get_user_messages(&user_id)
            .into_iter()
            .cloned()
            .collect();
        messages.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(messages)
    }

    /// Unread messages addressed to the user
    pub fn unread_count(&self, user: &UserRef) -> Result<usize> {
        let store = read(&self.store);
        let session = read(&self.session);
        let user_id = resolve_user_id(&store, &session, user)?;
        Ok(store
            .get_user_messages(&user_id)
            .into_iter()
            .filter(|msg| msg.recipient == user_id && !msg.read)
            .count())
    }

    /// Send a new root message from the current user
    pub fn send(&self, recipient: &UserRef, content: &str) -> Result<Message> {
        let content = require_content(content, "message")?;
        let mut store = write(&self.store);
        let session = read(&self.session);
        let sender = current_user_id(&session)?;
        let recipient = resolve_user_id(&store, &session, recipient)?;
        let message = store.create_message(NewMessage {
            content,
            sender: sender.clone(),
            recipient,
            parent_id: None,
        })?;
        tracing::info!(sender = %sender, recipient = %message.recipient, message = %message.id, "Message sent");
        Ok(message)
    }

    /// Reply to a message as the current user
    ///
    /// The reply goes back to the original sender and joins the
    /// original's thread (the store re-roots flat threads, so replying
    /// to a reply still lands under the root).
    pub fn reply(&self, message_id: &str, content: &str) -> Result<Message> {
        let content = require_content(content, "message")?;
        let mut store = write(&self.store);
        let sender = current_user_id(&read(&self.session))?;
        let recipient = store
            .get_message(message_id)
            .map(|original| original.sender.clone())
            .ok_or_else(|| AppError::MessageNotFound(message_id.to_string()))?;
        let message = store.create_message(NewMessage {
            content,
            sender: sender.clone(),
            recipient,
            parent_id: Some(message_id.to_string()),
        })?;
        tracing::info!(sender = %sender, parent = %message_id, message = %message.id, "Message reply sent");
        Ok(message)
    }

    /// All messages in a thread, ordered by timestamp ascending
    ///
    /// The id may name the root or any reply; either way the result is
    /// the root plus every reply referencing it.
    pub fn thread(&self, message_id: &str) -> Result<Vec<Message>> {
        let store = read(&self.store);
        let message = store
            .get_message(message_id)
            .ok_or_else(|| AppError::MessageNotFound(message_id.to_string()))?;
        let root_id = message
            .parent_id
            .clone()
            .unwrap_or_else(|| message.id.clone());

        let mut thread: Vec<Message> = store
            .get_all_messages()
            .into_iter()
            .filter(|msg| msg.id == root_id || msg.parent_id.as_deref() == Some(root_id.as_str()))
            .cloned()
            .collect();
        thread.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(thread)
    }

    /// Mark a message read
    pub fn mark_read(&self, message_id: &str) -> Result<Outcome> {
        write(&self.store).set_message_read(message_id, true)
    }

    /// Mark a message unread
    pub fn mark_unread(&self, message_id: &str) -> Result<Outcome> {
        write(&self.store).set_message_read(message_id, false)
    }

    /// Delete a message
    ///
    /// Deleting an absent id is [`Outcome::Unchanged`].
    pub fn delete(&self, message_id: &str) -> Outcome {
        let outcome = write(&self.store).delete_message(message_id);
        if outcome.is_applied() {
            tracing::info!(message = %message_id, "Message deleted");
        }
        outcome
    }

    /// Point-in-time export of the whole message table
    ///
    /// Ordered by timestamp ascending for a stable document. This is
    /// a snapshot, not a living format; there is no import.
    pub fn export(&self) -> Vec<ExportedMessage> {
        let store = read(&self.store);
        let mut messages = store.get_all_messages();
        messages.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        messages.into_iter().map(ExportedMessage::from).collect()
    }

    /// Export the message table as a pretty-printed JSON string
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Write the message export to a file
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let document = self.export();
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, &document)?;
        tracing::info!(path = %path.display(), messages = document.len(), "Messages exported");
        Ok(())
    }
}
