//! `keybot` is a small Telegram bot that shows off inline and reply keyboards.
//!
//! # Framework
//!
//! - [`Client`] posts requests to the Telegram Bot API. Its transport can be
//! swapped out, which is how [`fake::FakeAPI`] stands in for Telegram in tests.
//!
//! - [`Router`] long-polls for messages and callback queries and hands each
//! update to the [`Dispatcher`] on its own task.
//!
//! - [`Dispatcher`] classifies an update, picks a [`dispatcher::ReplyAction`]
//! from the fixed tables in [`menu`], and sends it.
//!
//! - [`reply`] holds the outbound values ([`reply::OutboundResponse`],
//! [`reply::KeyboardLayout`], [`reply::Acknowledgement`]) that handlers build.
//!
//! # Example
//!
//! ```no_run
//! use keybot::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     keybot::init_logger();
//!     let client = Client::new(std::env::var("TELEGRAM_TOKEN").unwrap());
//!     Router::new(client).start().await;
//! }
//! ```

#[macro_use]
extern crate log;

pub mod api;
pub mod client;
pub mod dispatcher;
pub mod error;
pub mod fake;
pub mod menu;
pub mod reply;
pub mod router;

pub use api::API;
pub use client::*;
pub use dispatcher::Dispatcher;
pub use router::*;

/// This method initializes [`env_logger`] from the environment, defaulting to `info` level logging.
pub fn init_logger() {
    // We use try_init here so it can by run by tests.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    debug!("Logger initialized.");
}
