use std::fmt;

use anyhow::Result;
use derive_more::*;
use serde::de::DeserializeOwned;

use crate::api::{ApiResponse, Request};

/// This is a wrapper around the Telegram API token string. Get your token from
/// [@BotFather](https://t.me/BotFather).
#[derive(Clone, From, Into, FromStr)]
pub struct ApiToken(String);

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// The token ends up in request URLs, keep it out of logs.
impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(..)")
    }
}

/// Anything that can carry a Bot API call: takes the method name and the JSON
/// request body, returns the JSON response body. [`Client`] uses HTTP unless
/// another handler is plugged in (see [`crate::fake::FakeAPI`]).
#[async_trait::async_trait]
pub trait Post {
    async fn post(&self, method: String, req: String) -> Result<String>;
}

/// This is a thin shim around the Telegram HTTP client. Requires a valid API token.
pub struct Client {
    /// This base URL is used for all requests and is constructed from the
    /// provided API token.
    base_url: String,

    /// The underlying HTTP client.
    client: reqwest::Client,

    /// Replaces the HTTP transport when set. Useful for testing.
    post_handler: Option<Box<dyn Post + Send + Sync>>,
}

impl Client {
    /// Returns a new Telegram API client.
    pub fn new(token: impl Into<ApiToken>) -> Self {
        let ApiToken(token) = token.into();
        Self {
            base_url: format!("https://api.telegram.org/bot{token}"),
            client: reqwest::Client::new(),
            post_handler: None,
        }
    }

    pub fn with_post_handler(mut self, post_handler: impl Post + Send + Sync + 'static) -> Self {
        self.post_handler = Some(Box::new(post_handler));
        self
    }

    /// Send `req` to the Telegram API method it is bound to, and decode the result.
    /// Telegram rejections come back as [`crate::api::ApiError::Telegram`].
    pub async fn post<Req, Resp>(&self, req: &Req) -> Result<Resp>
    where
        Req: Request,
        Resp: DeserializeOwned,
    {
        let method = Req::METHOD;
        let request = serde_json::to_string(req)?;
        debug!("POST /{}:\n{}", method, request);

        let body = if let Some(ref post_handler) = self.post_handler {
            post_handler.post(method.to_string(), request).await?
        } else {
            // Telegram answers errors with a non-2xx status and a JSON body, so
            // the status is not checked here.
            self.client
                .post(format!("{}/{}", self.base_url, method))
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(request)
                .send()
                .await?
                .text()
                .await?
        };
        debug!("Response /{}:\n{}", method, body);

        let response = ApiResponse::<Resp>::from_str(&body)?;
        Ok(response.into_result()?)
    }
}
