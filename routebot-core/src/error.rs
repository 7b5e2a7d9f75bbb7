//! Error types for the bot core.
//!
//! [`RoutebotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error (bot transport, handler, session or history store).
#[derive(Error, Debug)]
pub enum RoutebotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Store error: {0}")]
    Store(String),
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Unknown callback action: {0}")]
    UnknownAction(String),
}

/// Result type for core operations; uses [`RoutebotError`].
pub type Result<T> = std::result::Result<T, RoutebotError>;
