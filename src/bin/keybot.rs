/// Keyboard demo bot. Send it /start, /inline or /reply.
#[macro_use]
extern crate log;

use std::env;

use anyhow::Context;
use argh::FromArgs;
use keybot::*;

/// Telegram bot answering with inline and reply keyboards. The bot token is
/// read from $TELEGRAM_TOKEN.
#[derive(FromArgs)]
struct Args {
    /// long-polling timeout in seconds
    #[argh(option, default = "60")]
    poll_timeout: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    keybot::init_logger();
    let args: Args = argh::from_env();

    let token = env::var("TELEGRAM_TOKEN").context("TELEGRAM_TOKEN is not set")?;
    let mut router = Router::new(Client::new(token)).with_poll_timeout_s(args.poll_timeout);

    let me = router.api().get_me().await.context("getMe failed")?;
    info!(
        "Hello, World! I am bot {} and my name is {}.",
        me.id, me.first_name
    );

    let (shutdown_notifier, shutdown_tx) = router.shutdown();
    tokio::spawn(async move {
        router.start().await;
    });
    info!(
        "Start listening for @{}",
        me.username.as_deref().unwrap_or(&me.first_name)
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");
    shutdown_tx.send(()).await?;
    shutdown_notifier.notified().await;

    Ok(())
}
