//! Route conversation: commands, navigation buttons and the origin → destination dialogue.
//!
//! Events of one user arrive serially (see `routebot_telegram::UserQueues`), so reading and then
//! writing the session here needs no extra locking.

use async_trait::async_trait;
use route_planner::{
    format, Advance, ClearOutcome, PlanError, RoutePlanner, SessionState, SessionStore,
};
use routebot_core::{
    Bot, Button, HandlerError, Handler, HandlerResponse, Message, MessageKind, Reply, Result,
    RoutebotError,
};
use std::sync::Arc;
use teloxide::utils::command::{BotCommands, ParseError};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

pub const CALLBACK_NEW_ROUTE: &str = "start_new_route";
pub const CALLBACK_SHOW_HISTORY: &str = "show_history";
pub const CALLBACK_CANCEL: &str = "cancel_request";

pub const ASK_ORIGIN: &str = "Send me the starting point.";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "plan a new route")]
    Start,
    #[command(description = "show your route history")]
    History,
    #[command(description = "cancel the current request")]
    Cancel,
    #[command(description = "clear your route history")]
    ClearHistory,
    #[command(description = "show this help")]
    Help,
}

/// The "New route" / "History" / "Cancel" row attached to the greeting and route replies.
pub fn navigation_buttons() -> Vec<Vec<Button>> {
    vec![vec![
        Button::new("New route", CALLBACK_NEW_ROUTE),
        Button::new("History", CALLBACK_SHOW_HISTORY),
        Button::new("Cancel", CALLBACK_CANCEL),
    ]]
}

fn store_error(e: anyhow::Error) -> RoutebotError {
    RoutebotError::Store(e.to_string())
}

pub struct RouteConversationHandler {
    bot: Arc<dyn Bot>,
    planner: Arc<RoutePlanner>,
    sessions: Arc<dyn SessionStore>,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl RouteConversationHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        planner: Arc<RoutePlanner>,
        sessions: Arc<dyn SessionStore>,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            planner,
            sessions,
            bot_username,
        }
    }

    /// Parses the first word of a command. `Ok(None)` means the command is addressed to another bot.
    async fn parse_command(&self, text: &str) -> std::result::Result<Option<Command>, ParseError> {
        let head = text.split_whitespace().next().unwrap_or_default();
        let username = self.bot_username.read().await.clone().unwrap_or_default();
        match Command::parse(head, &username) {
            Ok(cmd) => Ok(Some(cmd)),
            Err(ParseError::WrongBotName(name)) => {
                info!(bot = %name, "Command addressed to another bot, ignored");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn send(&self, message: &Message, reply: Reply) -> Result<HandlerResponse> {
        self.bot.send_reply(&message.chat, &reply).await?;
        Ok(HandlerResponse::Reply(reply.text))
    }

    fn greeting(&self) -> Reply {
        Reply::html(format::greeting(self.planner.service_area().name()))
            .with_buttons(navigation_buttons())
    }

    async fn start(&self, message: &Message) -> Result<HandlerResponse> {
        self.sessions
            .put(message.user.id, SessionState::AwaitingOrigin)
            .await
            .map_err(store_error)?;
        info!(user_id = message.user.id, "step: session started, awaiting origin");
        self.send(message, self.greeting()).await
    }

    async fn show_history(&self, message: &Message) -> Result<HandlerResponse> {
        let entries = self
            .planner
            .history()
            .list(message.user.id)
            .await
            .map_err(store_error)?;
        info!(user_id = message.user.id, entries = entries.len(), "step: history listed");
        self.send(message, Reply::html(format::render_history(&entries)))
            .await
    }

    async fn cancel(&self, message: &Message) -> Result<HandlerResponse> {
        let removed = self
            .sessions
            .remove(message.user.id)
            .await
            .map_err(store_error)?;
        if removed.is_none() {
            info!(user_id = message.user.id, "Cancel without active session, ignored");
            return Ok(HandlerResponse::Stop);
        }
        info!(user_id = message.user.id, "step: session cancelled");
        self.send(message, Reply::plain(format::CANCELLED)).await
    }

    async fn clear_history(&self, message: &Message) -> Result<HandlerResponse> {
        let outcome = self
            .planner
            .history()
            .clear(message.user.id)
            .await
            .map_err(store_error)?;
        let text = match outcome {
            ClearOutcome::Cleared { removed } => {
                info!(user_id = message.user.id, removed, "step: history cleared");
                format::HISTORY_CLEARED
            }
            ClearOutcome::NothingToClear => format::NOTHING_TO_CLEAR,
        };
        self.send(message, Reply::plain(text)).await
    }

    async fn command(&self, message: &Message) -> Result<HandlerResponse> {
        let command = match self.parse_command(&message.content).await {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Ok(HandlerResponse::Stop),
            Err(e) => {
                info!(user_id = message.user.id, error = %e, "Unrecognized command, sending help");
                Command::Help
            }
        };
        match command {
            Command::Start => self.start(message).await,
            Command::History => self.show_history(message).await,
            Command::Cancel => self.cancel(message).await,
            Command::ClearHistory => self.clear_history(message).await,
            Command::Help => {
                self.send(message, Reply::plain(Command::descriptions().to_string()))
                    .await
            }
        }
    }

    fn plan_error_text(&self, e: &PlanError) -> String {
        if e.is_address_error() {
            format::address_not_found(self.planner.service_area().name())
        } else if matches!(e, PlanError::NoRouteFound) {
            format::NO_ROUTE_FOUND.to_string()
        } else {
            format::GENERIC_ERROR.to_string()
        }
    }

    async fn plan(&self, message: &Message, origin: String, destination: String) -> Result<HandlerResponse> {
        match self
            .planner
            .plan_trip(message.user.id, &origin, &destination)
            .await
        {
            Ok(report) => {
                let reply = Reply::html(report.render()).with_buttons(navigation_buttons());
                self.send(message, reply).await
            }
            Err(e) => {
                if e.is_address_error() {
                    info!(user_id = message.user.id, error = %e, "Address rejected");
                } else {
                    error!(user_id = message.user.id, error = %e, "Route request failed");
                }
                self.send(message, Reply::html(self.plan_error_text(&e))).await
            }
        }
    }

    async fn text(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        let state = match self.sessions.get(user_id).await {
            Ok(Some(state)) => state,
            Ok(None) => return self.send(message, Reply::plain(format::START_FIRST)).await,
            Err(e) => {
                error!(user_id, error = %e, "Failed to read session");
                return self.send(message, Reply::plain(format::GENERIC_ERROR)).await;
            }
        };

        if message.content.trim().is_empty() {
            info!(user_id, "Blank text, prompting again");
            let prompt = match &state {
                SessionState::AwaitingOrigin => ASK_ORIGIN,
                SessionState::AwaitingDestination { .. } => format::ASK_DESTINATION,
            };
            return self.send(message, Reply::plain(prompt)).await;
        }

        match state.accept(&message.content) {
            Advance::Next(next) => {
                if let Err(e) = self.sessions.put(user_id, next).await {
                    error!(user_id, error = %e, "Failed to store session");
                    let _ = self.sessions.remove(user_id).await;
                    return self.send(message, Reply::plain(format::GENERIC_ERROR)).await;
                }
                info!(user_id, "step: origin stored, awaiting destination");
                self.send(message, Reply::plain(format::ASK_DESTINATION)).await
            }
            Advance::Complete {
                origin,
                destination,
            } => {
                // The session ends with this request whatever its outcome.
                if let Err(e) = self.sessions.remove(user_id).await {
                    error!(user_id, error = %e, "Failed to clear session");
                }
                info!(user_id, "step: destination received, planning trip");
                self.plan(message, origin, destination).await
            }
        }
    }

    /// Edits the button's message, sending a new one when the edit is impossible.
    async fn edit_or_send(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        if let Err(e) = self.bot.edit_message(&message.chat, &message.id, text).await {
            warn!(error = %e, message_id = %message.id, "Edit failed, sending instead");
            self.bot.send_reply(&message.chat, &Reply::html(text)).await?;
        }
        Ok(HandlerResponse::Reply(text.to_string()))
    }

    async fn callback(&self, message: &Message, query_id: &str) -> Result<HandlerResponse> {
        if let Err(e) = self.bot.answer_callback(query_id).await {
            warn!(error = %e, query_id, "Failed to answer callback query");
        }

        match message.content.as_str() {
            CALLBACK_NEW_ROUTE => {
                self.sessions
                    .put(message.user.id, SessionState::AwaitingOrigin)
                    .await
                    .map_err(store_error)?;
                info!(user_id = message.user.id, "step: new route via button");
                self.edit_or_send(message, ASK_ORIGIN).await
            }
            CALLBACK_SHOW_HISTORY => self.show_history(message).await,
            CALLBACK_CANCEL => {
                let removed = self
                    .sessions
                    .remove(message.user.id)
                    .await
                    .map_err(store_error)?;
                if removed.is_none() {
                    return Ok(HandlerResponse::Stop);
                }
                info!(user_id = message.user.id, "step: session cancelled via button");
                self.edit_or_send(message, format::CANCELLED).await
            }
            other => Err(HandlerError::UnknownAction(other.to_string()).into()),
        }
    }
}

#[async_trait]
impl Handler for RouteConversationHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match &message.kind {
            MessageKind::Callback { query_id } => self.callback(message, query_id).await,
            MessageKind::Text if message.is_command() => self.command(message).await,
            MessageKind::Text => self.text(message).await,
        }
    }
}
