use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Client;

/// This is the main Telegram API client. Requires an instance of `Client` initialized
/// with a valid API token.
pub struct API {
    /// The underlying HTTP client.
    pub client: Client,
}

impl API {
    /// Returns a new Telegram API client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Request is a trait that all Telegram API requests must implement. Derive it
/// with `#[derive(BotRequest)]` and `#[bot(method = "...")]`.
pub trait Request: Serialize + Send + Sync {
    /// Bot API method this request is posted to.
    const METHOD: &'static str;
}

/// APIError wraps error messages returned by the Telegram API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Telegram rejected the call. `code` is the Bot API `error_code`, which
    /// mirrors the HTTP status (400, 403, 429...).
    #[error("Telegram error [{code}]: {description}")]
    Telegram { code: i64, description: String },

    #[error("No result")]
    NoResult,
}

/// This is a wrapper around the Telegram API response. If `ok` is `true`, then
/// `result` is guaranteed to be `Some`. If `ok` is `false`, then `description`
/// is guaranteed to be `Some`, with a description of the error.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    /// `true` if the request was successful.
    pub ok: bool,

    /// Error description, if `ok` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Error code, if `ok` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,

    /// The result of the request, if `ok` is `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

#[allow(clippy::should_implement_trait)]
impl<'de, T: Deserialize<'de>> ApiResponse<T> {
    pub fn from_str(data: &'de str) -> Result<Self> {
        let response: ApiResponse<T> = serde_json::from_str(data)?;
        Ok(response)
    }
}

impl<T> ApiResponse<T> {
    /// Wraps the result in an `Ok` ApiResponse.
    #[allow(non_snake_case)]
    pub fn Ok(result: T) -> Self {
        Self {
            ok: true,
            description: None,
            error_code: None,
            result: Some(result),
        }
    }

    /// Creates an error response with the given code and description.
    #[allow(non_snake_case)]
    pub fn Err(code: i64, description: impl Into<String>) -> Self {
        Self {
            ok: false,
            description: Some(description.into()),
            error_code: Some(code),
            result: None,
        }
    }

    /// Returns the result of the request, if `ok` is `true`. Otherwise, returns
    /// the Telegram error.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.ok {
            return Err(ApiError::Telegram {
                code: self.error_code.unwrap_or_default(),
                description: self
                    .description
                    .unwrap_or_else(|| "No error description".to_string()),
            });
        }

        self.result.ok_or(ApiError::NoResult)
    }
}
