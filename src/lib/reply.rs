//! Outbound responses as plain values. Handlers decide *what* to send by
//! building these; the conversions at the bottom turn them into Bot API
//! requests.

use crate::{
    api::{
        AnswerCallbackQueryRequest, InlineKeyboardButton, KeyboardButton, ReplyMarkup,
        SendMessageRequest,
    },
    menu::CallbackToken,
};

/// A button on an inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineButton {
    /// Opens `url` in the client.
    Url { label: String, url: String },

    /// Sends a callback query carrying `token` back to the bot.
    Callback { label: String, token: CallbackToken },
}

impl InlineButton {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Url {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn callback(label: impl Into<String>, token: CallbackToken) -> Self {
        Self::Callback {
            label: label.into(),
            token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardLayout {
    /// Button grid attached to the message.
    Inline(Vec<Vec<InlineButton>>),

    /// Preset text shortcuts replacing the client's input field.
    Reply { rows: Vec<Vec<String>>, resize: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundResponse {
    PlainText {
        chat_id: i64,
        text: String,
        reply_to_message_id: Option<i64>,
    },
    KeyboardPrompt {
        chat_id: i64,
        text: String,
        keyboard: KeyboardLayout,
    },
}

impl OutboundResponse {
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self::PlainText {
            chat_id,
            text: text.into(),
            reply_to_message_id: None,
        }
    }

    pub fn reply(chat_id: i64, message_id: i64, text: impl Into<String>) -> Self {
        Self::PlainText {
            chat_id,
            text: text.into(),
            reply_to_message_id: Some(message_id),
        }
    }

    pub fn keyboard(chat_id: i64, text: impl Into<String>, keyboard: KeyboardLayout) -> Self {
        Self::KeyboardPrompt {
            chat_id,
            text: text.into(),
            keyboard,
        }
    }
}

/// How a callback query is answered: an optional toast, shown as a modal
/// alert when `show_alert` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    pub toast: Option<String>,
    pub show_alert: bool,
}

impl Acknowledgement {
    pub fn into_request(self, callback_query_id: impl Into<String>) -> AnswerCallbackQueryRequest {
        let mut req = AnswerCallbackQueryRequest::new(callback_query_id);
        if let Some(toast) = self.toast {
            req = req.with_text(toast);
        }
        if self.show_alert {
            req = req.with_show_alert(true);
        }
        req
    }
}

impl From<InlineButton> for InlineKeyboardButton {
    fn from(button: InlineButton) -> Self {
        match button {
            InlineButton::Url { label, url } => InlineKeyboardButton::from(label).with_url(url),
            InlineButton::Callback { label, token } => {
                InlineKeyboardButton::from(label).with_callback_data(token.as_str())
            }
        }
    }
}

impl From<KeyboardLayout> for ReplyMarkup {
    fn from(layout: KeyboardLayout) -> Self {
        match layout {
            KeyboardLayout::Inline(rows) => ReplyMarkup::inline_keyboard_markup(
                rows.into_iter()
                    .map(|row| row.into_iter().map(Into::into).collect())
                    .collect(),
            ),
            KeyboardLayout::Reply { rows, resize } => ReplyMarkup::reply_keyboard_markup(
                rows.into_iter()
                    .map(|row| row.into_iter().map(KeyboardButton::from).collect())
                    .collect(),
                resize,
            ),
        }
    }
}

impl From<OutboundResponse> for SendMessageRequest {
    fn from(response: OutboundResponse) -> Self {
        match response {
            OutboundResponse::PlainText {
                chat_id,
                text,
                reply_to_message_id,
            } => SendMessageRequest {
                reply_to_message_id,
                ..SendMessageRequest::new(chat_id, text)
            },
            OutboundResponse::KeyboardPrompt {
                chat_id,
                text,
                keyboard,
            } => SendMessageRequest::new(chat_id, text).with_reply_markup(keyboard.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reply_keeps_thread() {
        let req: SendMessageRequest = OutboundResponse::reply(7, 42, "hi").into();

        assert_eq!(req.chat_id, 7);
        assert_eq!(req.text, "hi");
        assert_eq!(req.reply_to_message_id, Some(42));
        assert!(req.reply_markup.is_none());
    }

    #[test]
    fn callback_button_carries_token() {
        let button: InlineKeyboardButton =
            InlineButton::callback("Press", CallbackToken::Button2).into();

        assert_eq!(button.text, "Press");
        assert_eq!(button.callback_data.as_deref(), Some("button2"));
        assert_eq!(button.url, None);
    }

    #[test]
    fn acknowledgement_without_toast_sends_bare_answer() {
        let req = Acknowledgement::default().into_request("q1");

        assert_eq!(req, AnswerCallbackQueryRequest::new("q1"));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "callback_query_id": "q1" })
        );
    }

    #[test]
    fn reply_keyboard_serializes_resize_flag() {
        let markup: ReplyMarkup = KeyboardLayout::Reply {
            rows: vec![vec!["a".into(), "b".into()], vec!["c".into()]],
            resize: true,
        }
        .into();

        assert_eq!(
            serde_json::to_value(&markup).unwrap(),
            serde_json::json!({
                "keyboard": [[{ "text": "a" }, { "text": "b" }], [{ "text": "c" }]],
                "resize_keyboard": true
            })
        );
    }
}
