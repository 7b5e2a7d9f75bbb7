//! # Route bot application
//!
//! Wires the handler chain, the route planner and the Telegram transport. Loads config from env
//! and runs until Ctrl-C.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, build_providers, BotComponents};
pub use config::{BaseConfig, BotConfig, ServicesConfig};
pub use handlers::{navigation_buttons, Command, LoggingHandler, RouteConversationHandler};
pub use runner::run_bot;
