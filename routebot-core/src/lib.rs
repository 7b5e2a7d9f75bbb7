//! # routebot-core
//!
//! Core types and traits for the route bot: [`Bot`], [`Handler`], inbound [`Message`] and outgoing
//! [`Reply`] types, errors, and tracing initialization. Transport-agnostic; used by handler-chain,
//! routebot-telegram and route-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{HandlerError, Result, RoutebotError};
pub use logger::init_tracing;
pub use types::{
    Button, Chat, Handler, HandlerResponse, Message, MessageKind, Reply, TextFormat, ToCoreMessage,
    ToCoreUser, User,
};
