use keybot_derive::BotRequest;
use serde::{Deserialize, Serialize};

use super::API;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this user or bot
    pub id: i64,

    /// True, if this user is a bot
    #[serde(default)]
    pub is_bot: bool,

    /// User‘s or bot’s first name
    pub first_name: String,

    /// User‘s or bot’s last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// User‘s or bot’s username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// `getMe` takes no parameters and serializes to `{}`.
#[derive(Default, Debug, Clone, Serialize, Deserialize, BotRequest)]
#[bot(method = "getMe")]
pub struct GetMeRequest {}

impl API {
    /// A simple method for testing your bot's authentication token. Returns basic
    /// information about the bot.
    pub async fn get_me(&self) -> anyhow::Result<User> {
        self.client.post(&GetMeRequest::default()).await
    }
}
