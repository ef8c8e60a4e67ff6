use keybot_derive::BotRequest;
use serde::{Deserialize, Serialize};

use super::{message::Message, query::CallbackQuery, API};

/// One incoming update. At most one of the optional fields is present. Kinds
/// the bot does not subscribe to are not modelled; they deserialize with both
/// fields empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Update {
    /// The update‘s unique identifier. Update identifiers start from a
    /// certain positive number and increase sequentially.
    pub update_id: i64,

    /// New incoming message of any kind — text, photo, sticker, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// New incoming callback query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

/// Update kinds that can be requested through `allowed_updates`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedUpdate {
    Message,
    CallbackQuery,
}

/// Use this method to receive incoming updates using long or short
/// polling. An Array of Update objects is returned.
#[derive(Debug, Clone, Deserialize, Serialize, Default, BotRequest)]
#[bot(method = "getUpdates")]
pub struct GetUpdatesRequest {
    /// Identifier of the first update to be returned. Must be greater by
    /// one than the highest among the identifiers of previously received
    /// updates. An update is considered confirmed as soon as getUpdates is
    /// called with an offset higher than its update_id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Limits the number of updates to be retrieved. Defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Timeout in seconds for long polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    /// List the types of updates you want your bot to receive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<AllowedUpdate>>,
}

/// Convenience methods for `GetUpdatesRequest`.
impl GetUpdatesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: i64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_allowed_updates(mut self, allowed_updates: &[AllowedUpdate]) -> Self {
        self.allowed_updates = Some(allowed_updates.to_vec());
        self
    }
}

impl API {
    /// Use this method to receive incoming updates using long polling. An
    /// Array of Update objects is returned. See [the official docs](https://core.telegram.org/bots/api#getupdates)
    /// for more information.
    pub async fn get_updates(&self, req: &GetUpdatesRequest) -> anyhow::Result<Vec<Update>> {
        self.client.post(req).await
    }
}
