//! Message model for a conversation.
//!
//! Messages are plain data: construction fills in identity and timestamps,
//! everything else is owned by [`crate::log::ChatLog`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderKind {
    /// The person typing into the widget.
    User,
    /// The assistant behind the response provider.
    Bot,
}

/// Presence indicator shown next to a sender's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    #[default]
    Online,
    Away,
    Offline,
}

/// Message author identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Which side of the conversation this sender is on.
    pub id: SenderKind,
    /// Display name.
    pub name: String,
    /// Avatar reference (unused by the terminal renderer, carried for hosts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Presence indicator.
    pub status: PresenceStatus,
}

impl Sender {
    /// Create a user identity with the given display name.
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            id: SenderKind::User,
            name: name.into(),
            avatar: None,
            status: PresenceStatus::Online,
        }
    }

    /// Create a bot identity. The display name is the widget title.
    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            id: SenderKind::Bot,
            name: name.into(),
            avatar: None,
            status: PresenceStatus::Online,
        }
    }
}

/// An emoji reaction attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    /// Display name of whoever reacted.
    pub by: String,
}

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

/// A single chat entry.
///
/// Ids are UUIDv4 strings, unique per log regardless of how quickly
/// consecutive messages are created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID.
    pub id: String,
    /// Message text.
    pub content: String,
    /// Author identity.
    pub sender: Sender,
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Whether the message has been read.
    pub read: bool,
    /// Reactions, in the order they were added.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    /// Attachments, in the order they were added.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// Whether the message was edited after creation.
    pub edited: bool,
}

impl Message {
    /// Create a message with an explicit sender identity.
    pub fn with_sender(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            read: true,
            reactions: Vec::new(),
            attachments: Vec::new(),
            edited: false,
        }
    }

    /// Create a user message carrying the caller's display name.
    pub fn user(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_sender(content, Sender::user(name))
    }

    /// Create a bot message. The widget title doubles as the bot's name.
    pub fn bot(content: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_sender(content, Sender::bot(title))
    }

    /// The welcome message a freshly created widget greets with.
    pub fn welcome(title: &str) -> Self {
        Self::bot(
            format!("Hi! I'm {title}, your AI assistant. How can I help you today?"),
            title,
        )
    }

    /// Check if this message came from the bot.
    pub fn is_bot(&self) -> bool {
        self.sender.id == SenderKind::Bot
    }

    /// Check if this message came from the user.
    pub fn is_user(&self) -> bool {
        self.sender.id == SenderKind::User
    }
}
