//! Inbound message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// What the user did: typed text (commands included) or pressed an inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Text,
    /// Inline button press. `query_id` must be acknowledged through [`crate::Bot::answer_callback`];
    /// the message `id` is the message carrying the button.
    Callback { query_id: String },
}

/// A single inbound event with user, chat and content. For callbacks `content` holds the button data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Builds an incoming text message.
    pub fn text(id: impl Into<String>, user: User, chat: Chat, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: content.into(),
            kind: MessageKind::Text,
            created_at: Utc::now(),
        }
    }

    /// Builds an incoming button press; `id` is the id of the message the button belongs to.
    pub fn callback(
        id: impl Into<String>,
        query_id: impl Into<String>,
        user: User,
        chat: Chat,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: data.into(),
            kind: MessageKind::Callback {
                query_id: query_id.into(),
            },
            created_at: Utc::now(),
        }
    }

    /// True when the text starts with `/`.
    pub fn is_command(&self) -> bool {
        matches!(self.kind, MessageKind::Text) && self.content.trim_start().starts_with('/')
    }

    /// Callback query id, when this is a button press.
    pub fn callback_query_id(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Callback { query_id } => Some(query_id),
            MessageKind::Text => None,
        }
    }
}
