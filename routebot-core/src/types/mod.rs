//! Core types: user, chat, inbound message, handler response, outgoing reply, and the Handler trait.

mod chat;
mod handler;
mod message;
mod reply;
mod response;
mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::{Message, MessageKind};
pub use reply::{Button, Reply, TextFormat};
pub use response::HandlerResponse;
pub use user::User;
