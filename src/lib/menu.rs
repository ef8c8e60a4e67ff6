//! The bot's fixed vocabulary: which message texts and which callback tokens
//! it understands, and the canned reply for each.
//!
//! Both tables match exactly and case-sensitively. Anything that does not
//! parse into [`TextCommand`] or [`CallbackToken`] gets no reply.

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::reply::{Acknowledgement, InlineButton, KeyboardLayout, OutboundResponse};

/// Target of the URL button on the inline keyboard.
pub const WEBSITE_URL: &str = "https://habr.com/";

/// Sent back for stickers, photos and every other non-text message.
pub const USE_ONLY_TEXT: &str = "Use only text!";

/// Message texts the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum TextCommand {
    #[strum(serialize = "/start")]
    Start,
    #[strum(serialize = "/inline")]
    Inline,
    #[strum(serialize = "/reply")]
    Reply,
    #[strum(serialize = "Call me!")]
    CallMe,
    #[strum(serialize = "Write to my neighbor!")]
    WriteToNeighbor,
}

impl TextCommand {
    /// Exact match on the message text.
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The response to this command in `chat_id`. `message_id` is the message
    /// that carried the command; some replies are threaded to it.
    pub fn reply(self, chat_id: i64, message_id: i64) -> OutboundResponse {
        match self {
            Self::Start => start_menu(chat_id),
            Self::Inline => inline_keyboard(chat_id),
            Self::Reply => reply_keyboard(chat_id),
            Self::CallMe => {
                OutboundResponse::reply(chat_id, message_id, "Alright, send me your number!")
            }
            Self::WriteToNeighbor => {
                OutboundResponse::reply(chat_id, message_id, "Can't you do it yourself?")
            }
        }
    }
}

/// Callback data carried by the inline keyboard buttons. The keyboard is
/// built from these variants, and incoming callback data is parsed back into
/// them, so both ends always agree on the strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum CallbackToken {
    #[strum(serialize = "button1")]
    Button1,
    #[strum(serialize = "button2")]
    Button2,
    #[strum(serialize = "button3")]
    Button3,
}

impl CallbackToken {
    /// Exact match on the callback data.
    pub fn parse(data: &str) -> Option<Self> {
        data.parse().ok()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn acknowledgement(self) -> Acknowledgement {
        match self {
            Self::Button1 => Acknowledgement::default(),
            Self::Button2 => Acknowledgement {
                toast: Some("Here could be your text!".to_string()),
                show_alert: false,
            },
            Self::Button3 => Acknowledgement {
                toast: None,
                show_alert: true,
            },
        }
    }

    /// Follow-up message sent to the chat after the query is answered.
    pub fn reply(self, chat_id: i64) -> OutboundResponse {
        OutboundResponse::text(chat_id, format!("You pressed {}", self.as_str()))
    }
}

pub fn start_menu(chat_id: i64) -> OutboundResponse {
    OutboundResponse::text(
        chat_id,
        format!(
            "Choose a keyboard:\n{}\n{}",
            TextCommand::Inline.as_str(),
            TextCommand::Reply.as_str()
        ),
    )
}

pub fn inline_keyboard(chat_id: i64) -> OutboundResponse {
    OutboundResponse::keyboard(
        chat_id,
        "This is an inline keyboard!",
        KeyboardLayout::Inline(vec![
            vec![
                InlineButton::url("This is a button with a website", WEBSITE_URL),
                InlineButton::callback("And this is just a button", CallbackToken::Button1),
            ],
            vec![
                InlineButton::callback("Another one here", CallbackToken::Button2),
                InlineButton::callback("And here", CallbackToken::Button3),
            ],
        ]),
    )
}

pub fn reply_keyboard(chat_id: i64) -> OutboundResponse {
    // "Hello!" and "Goodbye!" are not commands; pressing them sends text the
    // bot ignores.
    OutboundResponse::keyboard(
        chat_id,
        "This is a reply keyboard!",
        KeyboardLayout::Reply {
            rows: vec![
                vec!["Hello!".to_string(), "Goodbye!".to_string()],
                vec![TextCommand::CallMe.as_str().to_string()],
                vec![TextCommand::WriteToNeighbor.as_str().to_string()],
            ],
            resize: true,
        },
    )
}

pub fn use_only_text(chat_id: i64) -> OutboundResponse {
    OutboundResponse::text(chat_id, USE_ONLY_TEXT)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn text_commands_match_exactly() {
        assert_eq!(TextCommand::parse("/start"), Some(TextCommand::Start));
        assert_eq!(TextCommand::parse("Call me!"), Some(TextCommand::CallMe));
        assert_eq!(TextCommand::parse("/START"), None);
        assert_eq!(TextCommand::parse("/start "), None);
        assert_eq!(TextCommand::parse("call me!"), None);
        assert_eq!(TextCommand::parse("Hello!"), None);
        assert_eq!(TextCommand::parse(""), None);
    }

    #[test]
    fn callback_tokens_match_exactly() {
        assert_eq!(CallbackToken::parse("button3"), Some(CallbackToken::Button3));
        assert_eq!(CallbackToken::parse("Button3"), None);
        assert_eq!(CallbackToken::parse("button4"), None);
    }

    #[test]
    fn every_inline_button_routes_back() {
        let OutboundResponse::KeyboardPrompt {
            keyboard: KeyboardLayout::Inline(rows),
            ..
        } = inline_keyboard(1)
        else {
            panic!("expected an inline keyboard");
        };

        let tokens: Vec<CallbackToken> = rows
            .into_iter()
            .flatten()
            .filter_map(|button| match button {
                InlineButton::Callback { token, .. } => Some(token),
                InlineButton::Url { .. } => None,
            })
            .collect();

        assert_eq!(tokens, CallbackToken::iter().collect::<Vec<_>>());
        for token in tokens {
            assert_eq!(CallbackToken::parse(token.as_str()), Some(token));
        }
    }

    #[test]
    fn reply_keyboard_commands_are_recognized() {
        let OutboundResponse::KeyboardPrompt {
            keyboard: KeyboardLayout::Reply { rows, resize },
            ..
        } = reply_keyboard(1)
        else {
            panic!("expected a reply keyboard");
        };

        assert!(resize);
        assert_eq!(rows.len(), 3);
        assert_eq!(TextCommand::parse(&rows[1][0]), Some(TextCommand::CallMe));
        assert_eq!(
            TextCommand::parse(&rows[2][0]),
            Some(TextCommand::WriteToNeighbor)
        );
    }

    #[test]
    fn acknowledgements() {
        assert_eq!(
            CallbackToken::Button1.acknowledgement(),
            Acknowledgement::default()
        );
        assert_eq!(
            CallbackToken::Button2.acknowledgement().toast.as_deref(),
            Some("Here could be your text!")
        );
        assert!(!CallbackToken::Button2.acknowledgement().show_alert);
        assert_eq!(
            CallbackToken::Button3.acknowledgement(),
            Acknowledgement {
                toast: None,
                show_alert: true
            }
        );
    }

    #[test]
    fn threaded_replies() {
        assert_eq!(
            TextCommand::CallMe.reply(5, 99),
            OutboundResponse::reply(5, 99, "Alright, send me your number!")
        );
        assert_eq!(
            TextCommand::WriteToNeighbor.reply(5, 99),
            OutboundResponse::reply(5, 99, "Can't you do it yourself?")
        );
        assert_eq!(
            TextCommand::Start.reply(5, 99),
            OutboundResponse::text(5, "Choose a keyboard:\n/inline\n/reply")
        );
    }
}
