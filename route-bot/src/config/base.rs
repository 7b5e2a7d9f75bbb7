//! Base config: Telegram connection and logging. Loaded from env.

use anyhow::Result;
use routebot_telegram::TelegramConfig;
use std::env;

pub const DEFAULT_LOG_FILE: &str = "logs/route-bot.log";

#[derive(Debug, Clone)]
pub struct BaseConfig {
    pub telegram: TelegramConfig,
    /// LOG_FILE
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Ok(Self { telegram, log_file })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if self.log_file.trim().is_empty() {
            anyhow::bail!("LOG_FILE is empty");
        }
        Ok(())
    }
}
