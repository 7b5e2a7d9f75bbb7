//! # Handler chain
//!
//! Runs a sequence of handlers for each inbound message. All `before` hooks run in order (any
//! `false` stops the chain); then `handle` runs until one returns Stop or Reply; then all `after`
//! hooks run in reverse order with the final response. `after` hooks also run when a handler fails,
//! seeing `Stop`, before the error is returned.

use routebot_core::{Handler, HandlerResponse, Message, MessageKind, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn kind_label(message: &Message) -> &'static str {
    match message.kind {
        MessageKind::Text if message.is_command() => "command",
        MessageKind::Text => "text",
        MessageKind::Callback { .. } => "callback",
    }
}

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    std::any::type_name_of_val(handler.as_ref())
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse. Returns the first Stop or Reply, or Continue.
    #[instrument(skip(self, message), fields(user_id = message.user.id, kind = kind_label(message)))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        if !self.run_before(message).await? {
            return Ok(HandlerResponse::Stop);
        }

        let outcome = self.run_handle(message).await;
        let final_response = match &outcome {
            Ok(response) => response.clone(),
            Err(_) => HandlerResponse::Stop,
        };

        self.run_after(message, &final_response).await?;

        info!(
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain finished"
        );
        outcome
    }

    async fn run_before(&self, message: &Message) -> Result<bool> {
        for handler in &self.handlers {
            if !handler.before(message).await? {
                info!(
                    handler = %handler_name(handler),
                    "step: handler before returned false, chain stopped"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn run_handle(&self, message: &Message) -> Result<HandlerResponse> {
        for handler in &self.handlers {
            let name = handler_name(handler);
            let response = handler.handle(message).await.map_err(|e| {
                error!(handler = %name, error = %e, "step: handler failed");
                e
            })?;
            debug!(handler = %name, response = ?response, "Handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(handler = %name, "step: handler chain stopped by handler");
                    return Ok(response);
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }
        Ok(HandlerResponse::Continue)
    }

    async fn run_after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        for handler in self.handlers.iter().rev() {
            handler.after(message, response).await?;
        }
        Ok(())
    }
}

// Integration tests live in tests/handler_chain_test.rs
