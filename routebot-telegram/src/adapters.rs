//! Adapters from Telegram (teloxide) types to routebot_core types.

use routebot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};
use teloxide::types::{CallbackQuery, Update, UpdateKind};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to a core text [`Message`]. Non-text messages get empty content.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or_else(|| User {
                id: 0,
                username: None,
                first_name: None,
                last_name: None,
            });
        let chat = Chat {
            id: self.0.chat.id.0,
            chat_type: format!("{:?}", self.0.chat.kind),
        };
        Message::text(
            self.0.id.to_string(),
            user,
            chat,
            self.0.text().unwrap_or(""),
        )
    }
}

/// Wraps a callback query (inline button press).
///
/// When the button's message is no longer available the user's private chat is assumed and the
/// message id is empty, so edits of it fail and the handler falls back to sending.
pub struct TelegramCallbackWrapper<'a>(pub &'a CallbackQuery);

impl<'a> ToCoreMessage for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Message {
        let user = TelegramUserWrapper(&self.0.from).to_core();
        let (message_id, chat) = match &self.0.message {
            Some(m) => (
                m.id().to_string(),
                Chat {
                    id: m.chat().id.0,
                    chat_type: format!("{:?}", m.chat().kind),
                },
            ),
            None => (
                String::new(),
                Chat {
                    id: user.id,
                    chat_type: "private".to_string(),
                },
            ),
        };
        Message::callback(
            message_id,
            self.0.id.to_string(),
            user,
            chat,
            self.0.data.clone().unwrap_or_default(),
        )
    }
}

/// Converts a pushed or polled update. Only text messages and button presses are kept.
pub fn update_to_core(update: &Update) -> Option<Message> {
    match &update.kind {
        UpdateKind::Message(msg) if msg.text().is_some() => {
            Some(TelegramMessageWrapper(msg).to_core())
        }
        UpdateKind::CallbackQuery(query) => Some(TelegramCallbackWrapper(query).to_core()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routebot_core::MessageKind;

    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    fn update(json: serde_json::Value) -> Update {
        serde_json::from_str(&json.to_string()).unwrap()
    }

    #[test]
    fn text_update_becomes_text_message() {
        let u = update(serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 5,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "text": "Khan Shatyr"
            }
        }));

        let msg = update_to_core(&u).unwrap();

        assert_eq!(msg.id, "5");
        assert_eq!(msg.user.id, 42);
        assert_eq!(msg.chat.id, 42);
        assert_eq!(msg.content, "Khan Shatyr");
        assert_eq!(msg.kind, MessageKind::Text);
    }

    #[test]
    fn callback_update_carries_query_id_and_data() {
        let u = update(serde_json::json!({
            "update_id": 2,
            "callback_query": {
                "id": "4382bfdwdsb323b2d9",
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "chat_instance": "-1",
                "data": "show_history",
                "message": {
                    "message_id": 77,
                    "date": 1700000000,
                    "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                    "from": {"id": 999, "is_bot": true, "first_name": "RouteBot"},
                    "text": "Hi!"
                }
            }
        }));

        let msg = update_to_core(&u).unwrap();

        assert_eq!(msg.callback_query_id(), Some("4382bfdwdsb323b2d9"));
        assert_eq!(msg.content, "show_history");
        assert_eq!(msg.id, "77");
        assert_eq!(msg.chat.id, 42);
    }

    #[test]
    fn non_text_message_is_dropped() {
        let u = update(serde_json::json!({
            "update_id": 3,
            "message": {
                "message_id": 6,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "location": {"latitude": 51.1, "longitude": 71.4}
            }
        }));
        assert!(update_to_core(&u).is_none());
    }
}
