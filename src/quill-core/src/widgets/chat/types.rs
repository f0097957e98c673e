//! Chat message types and roles.

use chrono::{DateTime, Local};
use ratatui::prelude::*;

use crate::style::QuillStyle;

/// Stable identifier of a message within one conversation.
pub type MessageId = u64;

// ============================================================
// MESSAGE ROLE
// ============================================================

/// Identifies the sender of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Header label shown above the message body.
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::User => "You",
            MessageRole::Assistant => "AI",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            MessageRole::User => QuillStyle::user_message(),
            MessageRole::Assistant => QuillStyle::assistant_message(),
        }
    }
}

// ============================================================
// MESSAGE
// ============================================================

/// A single chat message with metadata.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
    pub liked: bool,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, MessageRole::User, content)
    }

    pub fn assistant(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, MessageRole::Assistant, content)
    }

    fn new(id: MessageId, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            liked: false,
            timestamp: Local::now(),
        }
    }

    /// Replaces the timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// `HH:MM` in local time.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_message_creation() {
        let user = ChatMessage::user(1, "Hello");
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.content, "Hello");
        assert!(!user.liked);
        assert!(!user.is_assistant());

        let reply = ChatMessage::assistant(2, "Hi there");
        assert!(reply.is_assistant());
        assert_eq!(reply.id, 2);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(MessageRole::User.label(), "You");
        assert_eq!(MessageRole::Assistant.label(), "AI");
    }

    #[test]
    fn test_time_label() {
        let ts = Local
            .with_ymd_and_hms(2024, 5, 1, 9, 7, 0)
            .single()
            .expect("unambiguous local time");
        let msg = ChatMessage::user(1, "x").with_timestamp(ts);
        assert_eq!(msg.time_label(), "09:07");
    }
}
