//! Conversation data models
//!
//! Append-only, insertion-ordered message history rendered by the UI layer.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::persona;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from the user
    User,
    /// Message from the assistant (remote or fallback, indistinguishable)
    Model,
}

impl Role {
    /// Convert the role to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A single message in the conversation
///
/// Immutable once created. The id is derived from the creation timestamp;
/// uniqueness is best-effort, not guaranteed under rapid concurrent sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Timestamp-derived identifier
    pub id: String,
    /// Who sent the message
    pub role: Role,
    /// Message text
    pub text: String,
}

impl ChatMessage {
    /// Create a new message stamped with the current time
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            role,
            text: text.into(),
        }
    }
}

/// Ordered message history
///
/// Append-only: messages are pushed as they arrive and never reordered or
/// removed. Seeded with one synthetic model greeting.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Create a conversation seeded with the assistant greeting
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(Role::Model, persona::GREETING)],
        }
    }

    /// Append a message
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Number of messages, including the seeded greeting
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation holds no messages
    ///
    /// Never true for a conversation built with [`Conversation::new`].
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages in insertion order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recently appended message, if any
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
