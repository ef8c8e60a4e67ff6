//! `Router` runs the long-polling loop. It asks Telegram for messages and
//! callback queries, and hands every update to the [`Dispatcher`] on its own
//! task.
//!
//! Errors never stop the loop. A failed update is reported through the error
//! handler and dropped; a failed poll is reported, then retried after a short
//! delay.
use std::{cmp::max, sync::Arc, time::Duration};

use tokio::sync::{mpsc, Notify};

use crate::{
    api::{AllowedUpdate, GetUpdatesRequest},
    error::log_error,
    Client, Dispatcher, API,
};

/// Update kinds requested from Telegram; everything else is never delivered.
pub const ALLOWED_UPDATES: [AllowedUpdate; 2] =
    [AllowedUpdate::Message, AllowedUpdate::CallbackQuery];

pub type ErrorHandler = Arc<dyn Fn(&anyhow::Error) + Send + Sync>;

pub struct Router {
    api: Arc<API>,
    dispatcher: Dispatcher,

    /// Called with every per-update and polling failure.
    error_handler: ErrorHandler,

    /// HTTP poll timeout
    timeout_s: i64,

    /// Pause after a failed poll
    poll_error_delay: Duration,

    /// Shutdown notifier
    shutdown: Arc<Notify>,
    shutdown_tx: Arc<mpsc::Sender<()>>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl Router {
    /// Create a new router with the given client.
    pub fn new(client: Client) -> Self {
        let api = Arc::new(API::new(client));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Self {
            dispatcher: Dispatcher::new(Arc::clone(&api)),
            api,
            error_handler: Arc::new(log_error),
            timeout_s: 60,
            poll_error_delay: Duration::from_secs(1),
            shutdown: Arc::new(Notify::new()),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    pub fn with_poll_timeout_s(mut self, timeout_s: i64) -> Self {
        self.timeout_s = timeout_s;
        self
    }

    pub fn with_poll_error_delay(mut self, delay: Duration) -> Self {
        self.poll_error_delay = delay;
        self
    }

    /// Replace the default error handler, which logs the error.
    pub fn with_error_handler(
        mut self,
        error_handler: impl Fn(&anyhow::Error) + Send + Sync + 'static,
    ) -> Self {
        self.error_handler = Arc::new(error_handler);
        self
    }

    /// The API client shared with the dispatcher.
    pub fn api(&self) -> Arc<API> {
        Arc::clone(&self.api)
    }

    /// Returns a notifier that fires once the loop has stopped, and the sender
    /// that stops it.
    pub fn shutdown(&self) -> (Arc<Notify>, Arc<mpsc::Sender<()>>) {
        (Arc::clone(&self.shutdown), Arc::clone(&self.shutdown_tx))
    }

    /// Start the router. This runs until a shutdown message is received.
    pub async fn start(&mut self) {
        let mut last_update_id = 0;

        loop {
            debug!(
                "Polling /getUpdates with last_update_id = {} timeout = {}s",
                last_update_id, self.timeout_s
            );
            let req = GetUpdatesRequest::new()
                .with_timeout(self.timeout_s)
                .with_offset(last_update_id + 1)
                .with_allowed_updates(&ALLOWED_UPDATES);

            let result = tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
                result = self.api.get_updates(&req) => result,
            };

            let updates = match result {
                Ok(updates) => updates,
                Err(err) => {
                    warn!("Polling failed, retrying in {:?}", self.poll_error_delay);
                    (self.error_handler)(&err);
                    tokio::select! {
                        _ = self.shutdown_rx.recv() => {
                            info!("Received shutdown signal");
                            break;
                        }
                        _ = tokio::time::sleep(self.poll_error_delay) => continue,
                    }
                }
            };

            for update in updates {
                last_update_id = max(last_update_id, update.update_id);

                let dispatcher = self.dispatcher.clone();
                let error_handler = Arc::clone(&self.error_handler);
                tokio::spawn(async move {
                    if let Err(err) = dispatcher.handle(&update).await {
                        (error_handler)(&err);
                    }
                });
            }
        }

        // notify_one keeps a permit, so a waiter that shows up late still wakes.
        self.shutdown.notify_one();
    }
}
