//! Recording [`routebot_core::Bot`] for integration tests.

use async_trait::async_trait;
use routebot_core::{parse_message_id, Button, Chat, Reply, Result, TextFormat};
use std::sync::Mutex;

/// One outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
        format: TextFormat,
        buttons: Vec<Vec<Button>>,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
    },
    Answer {
        query_id: String,
    },
}

impl Sent {
    pub fn text(&self) -> Option<&str> {
        match self {
            Sent::Text { text, .. } | Sent::Edit { text, .. } => Some(text),
            Sent::Answer { .. } => None,
        }
    }
}

/// Mock Bot that records every call. `edit_message` fails for ids that are not numbers, like Telegram.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
}

impl MockBot {
    /// Returns and clears everything recorded so far.
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    fn push(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl routebot_core::Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.push(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
            format: TextFormat::Plain,
            buttons: Vec::new(),
        });
        Ok(())
    }

    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        self.push(Sent::Text {
            chat_id: chat.id,
            text: reply.text.clone(),
            format: reply.format,
            buttons: reply.buttons.clone(),
        });
        Ok(())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        parse_message_id(message_id)?;
        self.push(Sent::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str) -> Result<()> {
        self.push(Sent::Answer {
            query_id: query_id.to_string(),
        });
        Ok(())
    }
}
