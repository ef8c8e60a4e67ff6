//! This is a fake Telegram API server. It implements the handful of methods the
//! bot uses, but instead of talking to Telegram it routes everything through
//! [`FakeChat`] objects, which can be used to test bots.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use keybot::{fake::FakeAPI, Client, Router};
//!
//! let fakeserver = FakeAPI::new();
//! let client = Client::new("token").with_post_handler(fakeserver.clone());
//! let mut router = Router::new(client).with_poll_timeout_s(1);
//! tokio::spawn(async move { router.start().await });
//!
//! let chat = fakeserver.create_chat("qubyte").await;
//! chat.send_text("/start").await?;
//! let reply = chat.recv_event().await;
//! # Ok(())
//! # }
//! ```
use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, Mutex};

use crate::{
    api::{
        self, AnswerCallbackQueryRequest, ApiResponse, CallbackQuery, GetUpdatesRequest, Message,
        SendMessageRequest, Update,
    },
    Post,
};

/// Something the bot did that a chat can observe.
#[derive(Debug, Clone, PartialEq)]
pub enum FakeEvent {
    /// A `sendMessage` call addressed to the chat.
    Message(SendMessageRequest),

    /// An `answerCallbackQuery` call for a query raised in the chat.
    CallbackAnswer(AnswerCallbackQueryRequest),
}

impl FakeEvent {
    pub fn message(&self) -> Option<&SendMessageRequest> {
        match self {
            Self::Message(req) => Some(req),
            Self::CallbackAnswer(_) => None,
        }
    }

    pub fn callback_answer(&self) -> Option<&AnswerCallbackQueryRequest> {
        match self {
            Self::CallbackAnswer(req) => Some(req),
            Self::Message(_) => None,
        }
    }
}

/// What a chat pushes towards the bot. Update ids are assigned when the bot
/// polls.
#[derive(Debug, Clone)]
enum Incoming {
    Message(Message),
    CallbackQuery(CallbackQuery),
}

/// One user talking to the bot in a private chat.
pub struct FakeChat {
    pub chat_id: i64,
    pub user: api::User,
    update_tx: Arc<mpsc::Sender<Incoming>>,
    event_rx: Arc<Mutex<mpsc::Receiver<FakeEvent>>>,
}

impl FakeChat {
    fn message(&self) -> Message {
        Message {
            message_id: rand::random::<u32>() as i64,
            from: Some(self.user.clone()),
            date: Utc::now().timestamp(),
            chat: api::Chat {
                id: self.chat_id,
                chat_type: String::from("private"),
                username: self.user.username.clone(),
                first_name: Some(self.user.first_name.clone()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Send a text message to the bot. Returns the id of the new message.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<i64> {
        let message = Message {
            text: Some(text.into()),
            ..self.message()
        };
        let message_id = message.message_id;

        self.update_tx.send(Incoming::Message(message)).await?;
        Ok(message_id)
    }

    /// Send a sticker, i.e. a message without text.
    pub async fn send_sticker(&self, file_id: impl Into<String>) -> Result<i64> {
        let message = Message {
            sticker: Some(api::Sticker {
                file_id: file_id.into(),
                emoji: None,
            }),
            ..self.message()
        };
        let message_id = message.message_id;

        self.update_tx.send(Incoming::Message(message)).await?;
        Ok(message_id)
    }

    /// Press an inline button carrying `data`. Returns the callback query id.
    pub async fn send_callback_query(&self, data: impl Into<String>) -> Result<String> {
        let query_id = rand::random::<u64>().to_string();
        let query = CallbackQuery {
            id: query_id.clone(),
            from: self.user.clone(),
            message: Some(self.message()),
            data: Some(data.into()),
            ..Default::default()
        };

        self.update_tx.send(Incoming::CallbackQuery(query)).await?;
        Ok(query_id)
    }

    /// Send `message` to the bot as is, e.g. one without a sender.
    pub async fn send_raw_message(&self, message: Message) -> Result<()> {
        Ok(self.update_tx.send(Incoming::Message(message)).await?)
    }

    pub async fn recv_event(&self) -> Option<FakeEvent> {
        let mut rx = self.event_rx.lock().await;
        rx.recv().await
    }
}

#[derive(Clone)]
pub struct FakeAPI {
    pub bot_name: String,
    update_id: Arc<Mutex<i64>>,
    update_tx: Arc<mpsc::Sender<Incoming>>,
    update_rx: Arc<Mutex<mpsc::Receiver<Incoming>>>,

    /// Event queue per chat ID.
    chat_queue: Arc<Mutex<HashMap<i64, mpsc::Sender<FakeEvent>>>>,

    /// Callback query ID → chat ID, for routing answers.
    queries: Arc<Mutex<HashMap<String, i64>>>,

    /// One-shot failures per method: (error_code, description).
    failures: Arc<Mutex<HashMap<String, (i64, String)>>>,
}

impl Default for FakeAPI {
    fn default() -> Self {
        Self::new()
    }
}

fn hash<T: Hash>(t: &T) -> u64 {
    let mut s = DefaultHasher::new();
    t.hash(&mut s);
    s.finish()
}

impl FakeAPI {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);

        Self {
            bot_name: "keybot".to_string(),
            update_id: Arc::new(Mutex::new(0)),
            update_tx: Arc::new(tx),
            update_rx: Arc::new(Mutex::new(rx)),
            chat_queue: Arc::new(Mutex::new(HashMap::new())),
            queries: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn create_chat(&self, from: impl Into<String>) -> FakeChat {
        let from = from.into();
        let chat_id = rand::random::<u32>() as i64;
        let (tx, rx) = mpsc::channel(100);

        self.chat_queue.lock().await.insert(chat_id, tx);

        FakeChat {
            chat_id,
            user: api::User {
                id: hash(&from) as i64,
                first_name: from.clone(),
                username: Some(from),
                ..Default::default()
            },
            update_tx: Arc::clone(&self.update_tx),
            event_rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Make the next call to `method` fail with a Telegram error.
    pub async fn fail_next(&self, method: &str, code: i64, description: impl Into<String>) {
        self.failures
            .lock()
            .await
            .insert(method.to_string(), (code, description.into()));
    }

    /// Number of delivered callback queries that have not been answered or
    /// failed yet.
    pub async fn open_queries(&self) -> usize {
        self.queries.lock().await.len()
    }

    fn get_me(&self) -> ApiResponse<api::User> {
        ApiResponse::Ok(api::User {
            id: hash(&self.bot_name) as i64,
            is_bot: true,
            first_name: self.bot_name.clone(),
            username: Some(self.bot_name.clone()),
            ..Default::default()
        })
    }

    async fn get_updates(&self, req: GetUpdatesRequest) -> ApiResponse<Vec<Update>> {
        let mut rx = self.update_rx.lock().await;
        let timeout = Duration::from_secs(req.timeout.unwrap_or(1).max(0) as u64);

        tokio::select! {
            Some(incoming) = rx.recv() => {
                let update_id = {
                    let mut update_id = self.update_id.lock().await;
                    *update_id += 1;
                    *update_id
                };

                let update = match incoming {
                    Incoming::Message(message) => Update {
                        update_id,
                        message: Some(message),
                        ..Default::default()
                    },
                    Incoming::CallbackQuery(query) => {
                        if let Some(ref message) = query.message {
                            self.queries.lock().await.insert(query.id.clone(), message.chat.id);
                        }
                        Update {
                            update_id,
                            callback_query: Some(query),
                            ..Default::default()
                        }
                    }
                };
                ApiResponse::Ok(vec![update])
            }
            _ = tokio::time::sleep(timeout) => {
                ApiResponse::Ok(vec![])
            }
        }
    }

    async fn deliver(&self, chat_id: i64, event: FakeEvent) {
        let chat = self.chat_queue.lock().await.get(&chat_id).cloned();

        match chat {
            Some(chat) => {
                if chat.send(event).await.is_err() {
                    warn!("Chat {} is gone", chat_id);
                }
            }
            None => warn!("Can't find Chat with id = {}", chat_id),
        }
    }

    async fn send_message(&self, req: SendMessageRequest) -> ApiResponse<Message> {
        let message = Message {
            message_id: rand::random::<u32>() as i64,
            from: Some(self.get_me().result.unwrap_or_default()),
            date: Utc::now().timestamp(),
            chat: api::Chat {
                id: req.chat_id,
                chat_type: String::from("private"),
                ..Default::default()
            },
            text: Some(req.text.clone()),
            ..Default::default()
        };

        self.deliver(req.chat_id, FakeEvent::Message(req)).await;
        ApiResponse::Ok(message)
    }

    async fn answer_callback_query(&self, req: AnswerCallbackQueryRequest) -> ApiResponse<bool> {
        let chat_id = self.queries.lock().await.remove(&req.callback_query_id);

        match chat_id {
            Some(chat_id) => {
                self.deliver(chat_id, FakeEvent::CallbackAnswer(req)).await;
                ApiResponse::Ok(true)
            }
            None => ApiResponse::Err(400, "Bad Request: query is too old or query ID is invalid"),
        }
    }
}

#[async_trait]
impl Post for FakeAPI {
    async fn post(&self, method: String, req: String) -> Result<String> {
        use serde_json::to_string as json;

        debug!("method = {}, req = {}", method, req);

        if let Some((code, description)) = self.failures.lock().await.remove(&method) {
            debug!("Failing {} with {}: {}", method, code, description);
            if method == "answerCallbackQuery" {
                let req: AnswerCallbackQueryRequest = serde_json::from_str(&req)?;
                self.queries.lock().await.remove(&req.callback_query_id);
            }
            return Ok(json(&ApiResponse::<()>::Err(code, description))?);
        }

        let response = match method.as_str() {
            "getMe" => json(&self.get_me()),
            "getUpdates" => json(&self.get_updates(serde_json::from_str(&req)?).await),
            "sendMessage" => json(&self.send_message(serde_json::from_str(&req)?).await),
            "answerCallbackQuery" => {
                json(&self.answer_callback_query(serde_json::from_str(&req)?).await)
            }
            _ => {
                warn!("Unknown method: {}", method);
                json(&ApiResponse::<()>::Err(
                    404,
                    format!("Not Found: method {method} is not faked"),
                ))
            }
        }?;

        Ok(response)
    }
}
