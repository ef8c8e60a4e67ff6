use keybot_derive::BotRequest;
use serde::{Deserialize, Serialize};

use super::{message::Message, user::User, API};

#[derive(Default, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CallbackQuery {
    /// Unique identifier for this query
    pub id: String,

    /// Sender of the query
    pub from: User,

    /// Message with the callback button that originated the query. Note that
    /// message content and message date will not be available if the message
    /// is too old.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// Identifier of the message sent via the bot in inline mode, that
    /// originated the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,

    /// Data associated with the callback button. Be aware that a bad client
    /// can send arbitrary data in this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default, BotRequest)]
#[bot(method = "answerCallbackQuery")]
pub struct AnswerCallbackQueryRequest {
    /// Unique identifier for the query to be answered
    pub callback_query_id: String,

    /// Text of the notification. If not specified, nothing will be shown to the user, 0-200 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// If true, an alert will be shown by the client instead of a notification at the top of the chat screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alert: Option<bool>,
}

impl AnswerCallbackQueryRequest {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            ..Default::default()
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..self
        }
    }

    pub fn with_show_alert(self, show_alert: bool) -> Self {
        Self {
            show_alert: Some(show_alert),
            ..self
        }
    }
}

impl API {
    pub async fn answer_callback_query(
        &self,
        req: &AnswerCallbackQueryRequest,
    ) -> anyhow::Result<bool> {
        self.client.post(req).await
    }
}
