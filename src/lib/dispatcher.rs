//! `Dispatcher` turns one [`Update`] into at most one reply.
//!
//! Handling an update happens in three steps:
//!
//! 1. [`Inbound::classify`] reduces the wire update to what the bot cares
//!    about: a text message, a non-text message, or a callback query.
//! 2. [`Inbound::reply_action`] picks the response. This step is pure.
//! 3. [`Dispatcher::execute`] performs the Bot API calls.
//!
//! The dispatcher keeps no state between updates, so it can run for many
//! updates at once.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    api::{Update, API},
    menu::{self, CallbackToken, TextCommand},
    reply::{Acknowledgement, OutboundResponse},
};

/// An update that cannot be dispatched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("message {message_id} in chat {chat_id} has no sender")]
    MissingSender { chat_id: i64, message_id: i64 },

    #[error("callback query {0} has no originating message")]
    MissingOrigin(String),
}

/// Who sent an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub name: String,
}

/// The parts of an update the dispatcher looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Text {
        sender: Sender,
        chat_id: i64,
        message_id: i64,
        text: String,
    },
    NonText {
        sender: Sender,
        chat_id: i64,
        message_id: i64,
    },
    Callback {
        sender: Sender,
        chat_id: i64,
        query_id: String,
        data: Option<String>,
    },
    /// Anything the bot does not subscribe to.
    Other,
}

/// What to do about one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyAction {
    Ignore,
    Send(OutboundResponse),
    /// Answer the callback query, then send the follow-up message.
    Answer {
        query_id: String,
        ack: Acknowledgement,
        then: OutboundResponse,
    },
}

impl Inbound {
    pub fn classify(update: &Update) -> Result<Self, UpdateError> {
        if let Some(ref message) = update.message {
            let from = message
                .from
                .as_ref()
                .ok_or(UpdateError::MissingSender {
                    chat_id: message.chat.id,
                    message_id: message.message_id,
                })?;
            let sender = Sender {
                id: from.id,
                name: from.first_name.clone(),
            };

            Ok(match message.text {
                Some(ref text) => Self::Text {
                    sender,
                    chat_id: message.chat.id,
                    message_id: message.message_id,
                    text: text.clone(),
                },
                None => Self::NonText {
                    sender,
                    chat_id: message.chat.id,
                    message_id: message.message_id,
                },
            })
        } else if let Some(ref query) = update.callback_query {
            let origin = query
                .message
                .as_ref()
                .ok_or_else(|| UpdateError::MissingOrigin(query.id.clone()))?;

            Ok(Self::Callback {
                sender: Sender {
                    id: query.from.id,
                    name: query.from.first_name.clone(),
                },
                chat_id: origin.chat.id,
                query_id: query.id.clone(),
                data: query.data.clone(),
            })
        } else {
            Ok(Self::Other)
        }
    }

    /// The per-update log line. `None` for updates the bot does not handle.
    pub fn log_line(&self) -> Option<String> {
        match self {
            Self::Text { sender, text, .. } => Some(format!(
                "{} ({}) sent a message: {}",
                sender.name, sender.id, text
            )),
            Self::NonText { sender, .. } => Some(format!(
                "{} ({}) sent a message: ",
                sender.name, sender.id
            )),
            Self::Callback { sender, data, .. } => Some(format!(
                "{} ({}) pressed the button: {}",
                sender.name,
                sender.id,
                data.as_deref().unwrap_or_default()
            )),
            Self::Other => None,
        }
    }

    pub fn log(&self) {
        match self.log_line() {
            Some(line) => info!("{}", line),
            None => debug!("Ignoring unsupported update"),
        }
    }

    pub fn reply_action(&self) -> ReplyAction {
        match self {
            Self::Text {
                chat_id,
                message_id,
                text,
                ..
            } => match TextCommand::parse(text) {
                Some(command) => ReplyAction::Send(command.reply(*chat_id, *message_id)),
                None => ReplyAction::Ignore,
            },
            Self::NonText { chat_id, .. } => ReplyAction::Send(menu::use_only_text(*chat_id)),
            Self::Callback {
                chat_id,
                query_id,
                data,
                ..
            } => match data.as_deref().and_then(CallbackToken::parse) {
                Some(token) => ReplyAction::Answer {
                    query_id: query_id.clone(),
                    ack: token.acknowledgement(),
                    then: token.reply(*chat_id),
                },
                None => ReplyAction::Ignore,
            },
            Self::Other => ReplyAction::Ignore,
        }
    }
}

/// Routes updates to replies. Cheap to clone; clones share the API client.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<API>,
}

impl Dispatcher {
    pub fn new(api: Arc<API>) -> Self {
        Self { api }
    }

    /// Handle a single update. Errors are returned for the caller to report;
    /// nothing is sent to the chat on failure.
    pub async fn handle(&self, update: &Update) -> anyhow::Result<()> {
        let inbound = Inbound::classify(update)?;
        inbound.log();
        self.execute(inbound.reply_action()).await
    }

    pub async fn execute(&self, action: ReplyAction) -> anyhow::Result<()> {
        match action {
            ReplyAction::Ignore => {}
            ReplyAction::Send(response) => {
                self.api.send_message(&response.into()).await?;
            }
            ReplyAction::Answer {
                query_id,
                ack,
                then,
            } => {
                self.api
                    .answer_callback_query(&ack.into_request(query_id))
                    .await?;
                self.api.send_message(&then.into()).await?;
            }
        }
        Ok(())
    }
}
