use std::env;
use std::sync::Arc;

use anyhow::Context;
use lexicard_config::Config;
use lexicard_core::{Dictionary, HttpFetcher};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod context;
mod controller;
mod events;
mod io;
mod render;
mod spinner;


use self::controller::AppController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::load().context("failed to load configuration")?;

    let fetcher = Arc::new(HttpFetcher::new(&config.dictionary.user_agent)?);
    let dictionary = Dictionary::connect(
        fetcher,
        &config.dictionary.base_url,
        &config.dictionary.from,
        &config.dictionary.to,
    )
    .await
    .with_context(|| {
        format!(
            "cannot use dictionary {}{}",
            config.dictionary.from, config.dictionary.to
        )
    })?;

    let controller = AppController::new(config, dictionary);
    let mut tasks = controller.spawn_tasks()?;

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        _ = controller.cancel_token().cancelled() => {
            tracing::info!("Input closed, shutting down");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("event loop exited"),
                Ok(Err(e)) => tracing::error!("event loop failed: {e:#}"),
                Err(e) => tracing::error!("event loop panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while tasks.join_next().await.is_some() {}
    println!();
    Ok(())
}

/// `RUST_LOG` wins; `LEXICARD_LOG_JSON=1` switches to JSON lines. Always stderr.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexicard=warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if env::var("LEXICARD_LOG_JSON").is_ok_and(|v| v == "1") {
        builder.json().init();
    } else {
        builder.init();
    }
}
