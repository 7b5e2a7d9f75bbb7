//! Bot configuration: BaseConfig (Telegram + log) + ServicesConfig (maps, weather, service city).

mod base;
mod bot_config;
mod services;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use services::ServicesConfig;
