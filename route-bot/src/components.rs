//! Component factory: collaborator clients, stores, planner and the handler chain.

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use maps_client::{GoogleMapsClient, MapsProvider};
use route_planner::{
    HistoryStore, InMemoryHistoryStore, InMemorySessionStore, RoutePlanner, SessionStore,
};
use routebot_core::Bot;
use routebot_telegram::{build_bot, TelegramBotAdapter};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use weather_client::{OpenWeatherClient, WeatherProvider};

use crate::config::BotConfig;
use crate::handlers::{LoggingHandler, RouteConversationHandler};

/// Everything the runner needs. Cheap to clone.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot_adapter: Arc<dyn Bot>,
    pub planner: Arc<RoutePlanner>,
    pub sessions: Arc<dyn SessionStore>,
    pub history: Arc<dyn HistoryStore>,
    pub bot_username: Arc<RwLock<Option<String>>>,
}

/// Builds the HTTP clients for maps and weather from config.
pub fn build_providers(
    config: &BotConfig,
) -> Result<(Arc<dyn MapsProvider>, Arc<dyn WeatherProvider>)> {
    let services = config.services();
    let maps = GoogleMapsClient::new(
        services.google_maps_api_key.clone(),
        services.google_maps_base_url.clone(),
        services.http_timeout(),
    )
    .context("Failed to build Google Maps client")?
    .with_language(services.maps_language.clone());
    let weather = OpenWeatherClient::new(
        services.openweather_api_key.clone(),
        services.openweather_base_url.clone(),
        services.weather_lang.clone(),
        services.http_timeout(),
    )
    .context("Failed to build OpenWeather client")?;
    Ok((Arc::new(maps), Arc::new(weather)))
}

/// Builds components with in-memory stores. `bot_override` replaces the Telegram adapter (tests).
#[instrument(skip_all)]
pub fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn Bot>>,
) -> Result<BotComponents> {
    let (maps, weather) = build_providers(config)?;
    let area = config.services().service_area();
    info!(city = %area.name(), spellings = ?area.spellings(), "Service area configured");

    let history: Arc<dyn HistoryStore> = Arc::new(InMemoryHistoryStore::new());
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let planner = Arc::new(RoutePlanner::new(maps, weather, area, history.clone()));

    let teloxide_bot = build_bot(config.telegram());
    let bot_adapter: Arc<dyn Bot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    Ok(BotComponents {
        teloxide_bot,
        bot_adapter,
        planner,
        sessions,
        history,
        bot_username: Arc::new(RwLock::new(None)),
    })
}

/// Logging first, then the conversation handler.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let conversation = RouteConversationHandler::new(
        components.bot_adapter.clone(),
        components.planner.clone(),
        components.sessions.clone(),
        components.bot_username.clone(),
    );
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(conversation))
}
