//! Handlers of the route bot chain.

mod conversation;
mod logging;

pub use conversation::{
    navigation_buttons, Command, RouteConversationHandler, ASK_ORIGIN, CALLBACK_CANCEL,
    CALLBACK_NEW_ROUTE, CALLBACK_SHOW_HISTORY,
};
pub use logging::LoggingHandler;
