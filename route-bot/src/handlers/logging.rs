//! Logs each inbound event in before() and the response in after(); always continues.

use async_trait::async_trait;
use routebot_core::{Handler, HandlerResponse, Message, MessageKind, Result};
use tracing::{debug, info, instrument};

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        match &message.kind {
            MessageKind::Text => info!(
                user_id = message.user.id,
                username = %message.user.username.as_deref().unwrap_or("unknown"),
                message_content = %message.content,
                "Received message"
            ),
            MessageKind::Callback { query_id } => info!(
                user_id = message.user.id,
                username = %message.user.username.as_deref().unwrap_or("unknown"),
                query_id = %query_id,
                data = %message.content,
                "Received button press"
            ),
        }
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}
