//! HTTP surface: liveness at `/` and the webhook at `/{BOT_TOKEN}`.
//!
//! The webhook path segment is the bot token, so only Telegram (which was given the URL) can post.
//! A wrong segment answers 404; an unparsable body answers 400; anything else answers 200 once the
//! update is queued, without waiting for it to be handled.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use teloxide::types::Update;
use tracing::{debug, error, info, warn};

use crate::adapters::update_to_core;
use crate::queue::InboundSink;

pub const LIVENESS_TEXT: &str = "Route bot is running!";

#[derive(Clone)]
pub struct WebhookState {
    token: Arc<str>,
    sink: Arc<dyn InboundSink>,
}

impl WebhookState {
    pub fn new(token: impl Into<String>, sink: Arc<dyn InboundSink>) -> Self {
        Self {
            token: Arc::from(token.into()),
            sink,
        }
    }
}

pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/:token", post(receive_update))
        .with_state(state)
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

async fn receive_update(
    State(state): State<WebhookState>,
    Path(token): Path<String>,
    body: Bytes,
) -> StatusCode {
    if token != *state.token {
        warn!("Webhook called with unknown path");
        return StatusCode::NOT_FOUND;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, "Webhook body is not a Telegram update");
            return StatusCode::BAD_REQUEST;
        }
    };

    match update_to_core(&update) {
        Some(message) => {
            info!(
                update_id = ?update.id,
                user_id = message.user.id,
                chat_id = message.chat.id,
                "Received update via webhook"
            );
            state.sink.submit(message);
        }
        None => debug!(update_id = ?update.id, "Ignoring unsupported update"),
    }
    StatusCode::OK
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C; HTTP server runs until killed");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl-C, stopping HTTP server");
}

/// Binds `addr` and serves `app` until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;
    info!(address = %addr, "HTTP surface listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}
