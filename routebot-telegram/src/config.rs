//! Transport config: token, Bot API URL, update delivery mode and the HTTP surface.
//! Loaded from BOT_TOKEN, TELEGRAM_API_URL / TELOXIDE_API_URL, UPDATE_MODE, WEBHOOK_URL, HTTP_BIND_ADDR.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_HTTP_BIND_ADDR: &str = "0.0.0.0:5000";

/// How updates reach the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Long polling; the webhook is deleted at start-up.
    #[default]
    Polling,
    /// Telegram pushes updates to `{WEBHOOK_URL}/{BOT_TOKEN}`.
    Webhook,
}

impl FromStr for UpdateMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polling" => Ok(UpdateMode::Polling),
            "webhook" => Ok(UpdateMode::Webhook),
            other => anyhow::bail!("UPDATE_MODE must be `polling` or `webhook`, got `{}`", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub update_mode: UpdateMode,
    /// Public base URL; the webhook path segment is the bot token.
    pub webhook_url: Option<String>,
    pub http_bind_addr: String,
}

impl TelegramConfig {
    /// Loads from the environment. `token` overrides BOT_TOKEN if provided.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let update_mode = match env::var("UPDATE_MODE") {
            Ok(s) => s.parse()?,
            Err(_) => UpdateMode::default(),
        };
        let webhook_url = env::var("WEBHOOK_URL").ok().filter(|s| !s.trim().is_empty());
        let http_bind_addr =
            env::var("HTTP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_HTTP_BIND_ADDR.to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            update_mode,
            webhook_url,
            http_bind_addr,
        })
    }

    /// Uses the given token with polling and the default bind address.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            update_mode: UpdateMode::Polling,
            webhook_url: None,
            http_bind_addr: DEFAULT_HTTP_BIND_ADDR.to_string(),
        }
    }

    /// Checks URLs and the bind address; webhook mode requires WEBHOOK_URL.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.update_mode == UpdateMode::Webhook && self.webhook_url.is_none() {
            anyhow::bail!("UPDATE_MODE=webhook requires WEBHOOK_URL");
        }
        if self.webhook_url.is_some() {
            self.webhook_endpoint()?;
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.http_bind_addr
            .parse()
            .with_context(|| format!("HTTP_BIND_ADDR is not a socket address: {}", self.http_bind_addr))
    }

    /// `{WEBHOOK_URL}/{BOT_TOKEN}`, or `None` without a WEBHOOK_URL.
    pub fn webhook_endpoint(&self) -> Result<Option<reqwest::Url>> {
        let Some(base) = &self.webhook_url else {
            return Ok(None);
        };
        let raw = format!("{}/{}", base.trim_end_matches('/'), self.bot_token);
        let url = reqwest::Url::parse(&raw)
            .with_context(|| format!("WEBHOOK_URL is not a valid URL: {}", base))?;
        Ok(Some(url))
    }
}
