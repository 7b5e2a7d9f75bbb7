//! Bot abstraction for sending and editing messages.
//!
//! [`Bot`] is transport-agnostic; routebot-telegram implements it over teloxide and tests substitute
//! a recording implementation.

use crate::error::{Result, RoutebotError};
use crate::types::{Chat, Message, Reply};
use async_trait::async_trait;

/// Abstraction for outbound traffic. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a formatted reply, with inline buttons when `reply.buttons` is not empty.
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()>;
    /// Sends a plain text reply to the chat the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
    /// Replaces the text of an already-sent message with HTML `text`; `message_id` is transport-specific.
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Acknowledges a button press so the client stops its progress indicator.
    async fn answer_callback(&self, query_id: &str) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| RoutebotError::Bot(format!("Invalid message_id for edit: {}", s)))
}
