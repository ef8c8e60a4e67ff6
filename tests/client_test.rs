use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use keybot::{
    api::{ApiError, GetUpdatesRequest, SendMessageRequest, API},
    error::describe_error,
    menu, *,
};

/// Answers every call with a canned body and remembers what was posted.
#[derive(Clone)]
struct CannedPost {
    body: String,
    calls: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl CannedPost {
    fn new(body: serde_json::Value) -> Self {
        Self {
            body: body.to_string(),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }

    fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Post for CannedPost {
    async fn post(&self, method: String, req: String) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((method, serde_json::from_str(&req)?));
        Ok(self.body.clone())
    }
}

fn api(post: &CannedPost) -> API {
    API::new(Client::new("token").with_post_handler(post.clone()))
}

#[tokio::test]
async fn get_me() {
    let post = CannedPost::new(serde_json::json!({
        "ok": true,
        "result": { "id": 42, "is_bot": true, "first_name": "Keys", "username": "keys_bot" }
    }));

    let me = api(&post).get_me().await.unwrap();

    assert_eq!(me.id, 42);
    assert_eq!(me.first_name, "Keys");
    assert_eq!(me.username.as_deref(), Some("keys_bot"));
    assert_eq!(post.calls(), vec![("getMe".to_string(), serde_json::json!({}))]);
}

#[tokio::test]
async fn get_updates_asks_for_messages_and_callbacks() {
    let post = CannedPost::new(serde_json::json!({ "ok": true, "result": [] }));

    let updates = api(&post)
        .get_updates(
            &GetUpdatesRequest::new()
                .with_offset(8)
                .with_timeout(30)
                .with_allowed_updates(&ALLOWED_UPDATES),
        )
        .await
        .unwrap();

    assert!(updates.is_empty());
    assert_eq!(
        post.calls(),
        vec![(
            "getUpdates".to_string(),
            serde_json::json!({
                "offset": 8,
                "timeout": 30,
                "allowed_updates": ["message", "callback_query"]
            })
        )]
    );
}

#[tokio::test]
async fn send_message_serializes_keyboard() {
    let post = CannedPost::new(serde_json::json!({
        "ok": true,
        "result": { "message_id": 5, "date": 0, "chat": { "id": 9, "type": "private" } }
    }));

    let req: SendMessageRequest = menu::inline_keyboard(9).into();
    let sent = api(&post).send_message(&req).await.unwrap();

    assert_eq!(sent.message_id, 5);
    assert_eq!(
        post.calls(),
        vec![(
            "sendMessage".to_string(),
            serde_json::json!({
                "chat_id": 9,
                "text": "This is an inline keyboard!",
                "reply_markup": {
                    "inline_keyboard": [
                        [
                            { "text": "This is a button with a website", "url": "https://habr.com/" },
                            { "text": "And this is just a button", "callback_data": "button1" }
                        ],
                        [
                            { "text": "Another one here", "callback_data": "button2" },
                            { "text": "And here", "callback_data": "button3" }
                        ]
                    ]
                }
            })
        )]
    );
}

#[tokio::test]
async fn telegram_errors_keep_their_code() {
    let post = CannedPost::new(serde_json::json!({
        "ok": false,
        "error_code": 429,
        "description": "Too Many Requests: retry after 5"
    }));

    let err = api(&post)
        .send_message(&SendMessageRequest::new(1, "hi"))
        .await
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ApiError>(),
        Some(&ApiError::Telegram {
            code: 429,
            description: "Too Many Requests: retry after 5".to_string()
        })
    );
    assert_eq!(
        describe_error(&err),
        "Telegram API Error:\n[429]\nToo Many Requests: retry after 5"
    );
}

#[tokio::test]
async fn ok_without_result() {
    let post = CannedPost::new(serde_json::json!({ "ok": true }));

    let err = api(&post).get_me().await.unwrap_err();

    assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::NoResult));
}

#[tokio::test]
async fn garbage_is_not_a_telegram_error() {
    let post = CannedPost {
        body: "<html>502 Bad Gateway</html>".to_string(),
        calls: Arc::new(Mutex::new(vec![])),
    };

    let err = api(&post).get_me().await.unwrap_err();

    assert!(err.downcast_ref::<ApiError>().is_none());
    assert!(!describe_error(&err).starts_with("Telegram API Error"));
}
