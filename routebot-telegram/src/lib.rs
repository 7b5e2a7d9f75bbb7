//! # routebot-telegram
//!
//! Telegram transport layer: converts teloxide updates to [`routebot_core::Message`], implements
//! [`routebot_core::Bot`] over teloxide, and delivers inbound events to a [`HandlerChain`](handler_chain::HandlerChain)
//! through per-user serial queues. Updates arrive by long polling ([`run_polling`]) and/or through
//! the HTTP webhook surface ([`router`]).

mod adapters;
mod bot_adapter;
mod config;
mod queue;
mod runner;
mod webhook;

pub use adapters::{update_to_core, TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, UpdateMode, DEFAULT_HTTP_BIND_ADDR};
pub use queue::{InboundSink, UserQueues};
pub use runner::{build_bot, prepare_updates, register_commands, run_polling};
pub use webhook::{router, serve, WebhookState, LIVENESS_TEXT};
