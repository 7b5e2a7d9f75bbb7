#![allow(dead_code)]

pub mod fakes;
pub mod mock_bot;

use handler_chain::HandlerChain;
use route_bot::{LoggingHandler, RouteConversationHandler};
use route_planner::{InMemoryHistoryStore, InMemorySessionStore, RoutePlanner, ServiceArea};
use routebot_core::{Chat, Message, User};
use std::sync::{Arc, Once};
use tokio::sync::RwLock;
use tracing_subscriber::{fmt, EnvFilter};

use fakes::{FakeMaps, FakeWeather};
use mock_bot::MockBot;

pub const BOT_USERNAME: &str = "route_test_bot";

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_env_filter(env_filter).with_test_writer().try_init();
    });
}

/// Chain wired like production, with fakes behind every collaborator.
pub struct Harness {
    pub chain: HandlerChain,
    pub bot: Arc<MockBot>,
    pub sessions: InMemorySessionStore,
    pub history: InMemoryHistoryStore,
}

impl Harness {
    pub fn new(maps: FakeMaps) -> Self {
        init_tracing();
        let bot = Arc::new(MockBot::default());
        let sessions = InMemorySessionStore::new();
        let history = InMemoryHistoryStore::new();
        let planner = Arc::new(RoutePlanner::new(
            Arc::new(maps),
            Arc::new(FakeWeather),
            ServiceArea::new("Astana", ["Астана"]),
            Arc::new(history.clone()),
        ));
        let handler = RouteConversationHandler::new(
            bot.clone(),
            planner,
            Arc::new(sessions.clone()),
            Arc::new(RwLock::new(Some(BOT_USERNAME.to_string()))),
        );
        let chain = HandlerChain::new()
            .add_handler(Arc::new(LoggingHandler))
            .add_handler(Arc::new(handler));
        Self {
            chain,
            bot,
            sessions,
            history,
        }
    }

    pub async fn text(&self, user_id: i64, content: &str) {
        self.chain
            .handle(&Message::text("100", user(user_id), chat(user_id), content))
            .await
            .unwrap();
    }

    pub async fn press(&self, user_id: i64, message_id: &str, data: &str) {
        self.chain
            .handle(&Message::callback(
                message_id,
                format!("q-{data}"),
                user(user_id),
                chat(user_id),
                data,
            ))
            .await
            .unwrap();
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{id}")),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn chat(id: i64) -> Chat {
    Chat {
        id,
        chat_type: "Private".to_string(),
    }
}
