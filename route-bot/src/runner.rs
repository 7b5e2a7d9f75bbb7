use anyhow::Result;
use routebot_core::init_tracing;
use routebot_telegram::{
    prepare_updates, register_commands, router, run_polling, serve, InboundSink, UpdateMode,
    UserQueues, WebhookState,
};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, instrument, warn};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::handlers::Command;

/// Main entry: validate config, init logging, build components, register with Telegram, then
/// serve the HTTP surface (and long-poll in polling mode) until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let telegram = config.telegram();
    info!(
        mode = ?telegram.update_mode,
        bind = %telegram.http_bind_addr,
        city = %config.services().service_city,
        "Initializing bot"
    );

    let components = build_bot_components(&config, None)?;
    let bot = components.teloxide_bot.clone();

    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *components.bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; commands addressed by @name will be ignored"),
    }

    register_commands(&bot, Command::bot_commands()).await;
    prepare_updates(&bot, telegram).await?;

    let chain = build_handler_chain(&components);
    let sink: Arc<dyn InboundSink> = Arc::new(UserQueues::new(chain));
    let app = router(WebhookState::new(telegram.bot_token.clone(), sink.clone()));
    let addr = telegram.bind_addr()?;

    info!("Bot started successfully");
    match telegram.update_mode {
        UpdateMode::Webhook => serve(addr, app).await?,
        UpdateMode::Polling => {
            tokio::try_join!(serve(addr, app), run_polling(bot, sink))?;
        }
    }

    info!("Bot stopped");
    Ok(())
}
