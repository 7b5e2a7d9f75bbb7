//! Bot construction, start-up registration with Telegram and the long-polling dispatcher.

use anyhow::{Context, Result};
use routebot_core::ToCoreMessage;
use std::sync::Arc;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    prelude::*,
    types::{BotCommand, CallbackQuery},
};
use tracing::{error, info, instrument, warn};

use crate::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::config::{TelegramConfig, UpdateMode};
use crate::queue::InboundSink;

/// Creates the teloxide Bot, pointing it at TELEGRAM_API_URL when configured.
pub fn build_bot(config: &TelegramConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    if let Some(ref url_str) = config.telegram_api_url {
        match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        }
    } else {
        bot
    }
}

/// Publishes the command menu shown by Telegram clients. Failure is logged only.
pub async fn register_commands(bot: &teloxide::Bot, commands: Vec<BotCommand>) {
    let count = commands.len();
    match bot.set_my_commands(commands).await {
        Ok(_) => info!(count, "Bot commands registered"),
        Err(e) => warn!(error = %e, "Failed to register bot commands"),
    }
}

/// Webhook mode registers `{WEBHOOK_URL}/{BOT_TOKEN}`; polling mode deletes any webhook so
/// getUpdates is allowed.
#[instrument(skip_all, fields(mode = ?config.update_mode))]
pub async fn prepare_updates(bot: &teloxide::Bot, config: &TelegramConfig) -> Result<()> {
    match config.update_mode {
        UpdateMode::Webhook => {
            let url = config
                .webhook_endpoint()?
                .context("UPDATE_MODE=webhook requires WEBHOOK_URL")?;
            bot.set_webhook(url)
                .await
                .context("Failed to register webhook")?;
            info!("Webhook registered");
        }
        UpdateMode::Polling => {
            if let Err(e) = bot.delete_webhook().await {
                warn!(error = %e, "Failed to delete webhook (continuing anyway)");
            }
        }
    }
    Ok(())
}

async fn on_message(msg: teloxide::types::Message, sink: Arc<dyn InboundSink>) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    match msg.text() {
        Some(text) => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_content = %text,
                "Received message"
            );
            sink.submit(core_msg);
        }
        None => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Received non-text message, ignored"
            );
        }
    }
    Ok(())
}

async fn on_callback(query: CallbackQuery, sink: Arc<dyn InboundSink>) -> ResponseResult<()> {
    let core_msg = TelegramCallbackWrapper(&query).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        data = %core_msg.content,
        "Received button press"
    );
    sink.submit(core_msg);
    Ok(())
}

/// Long-polls until Ctrl-C, submitting text messages and button presses to `sink`.
#[instrument(skip_all)]
pub async fn run_polling(bot: teloxide::Bot, sink: Arc<dyn InboundSink>) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot authenticated");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("Starting dispatcher with long polling");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![sink])
        .default_handler(|upd| async move {
            tracing::debug!(update_id = ?upd.id, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
