use std::sync::Arc;

use thiserror::Error;

use kick_fan::config::Config;
use kick_fan::kick::HttpKickApi;
use kick_fan::poller::{Poller, PollerErr};
use kick_fan::store::{Settings, StoreErr, redis::redis_store};
use kick_fan::surface::{ConsoleAudio, ConsoleBadge, ConsoleNotifier, ConsoleTabs};
use kick_fan::util::trace;

#[derive(Debug, Error)]
enum RunnerErr {
    #[error(transparent)]
    Store(#[from] StoreErr),

    #[error(transparent)]
    Poller(#[from] PollerErr),
}

type Result<T> = core::result::Result<T, RunnerErr>;

#[tokio::main]
async fn main() -> Result<()> {
    trace::init();

    let config = Config::from_env();
    tracing::info!(?config, "starting live-channel monitor");

    let store = redis_store(&config.redis_url).await?;
    let settings = Settings::new(Arc::new(store.clone()));
    let api = Arc::new(HttpKickApi::new(&config.kick_api_base));

    let poller = Arc::new(
        Poller::new(
            api,
            settings,
            Arc::new(ConsoleNotifier),
            Arc::new(ConsoleTabs::default()),
            Arc::new(ConsoleAudio::default()),
            Arc::new(ConsoleBadge),
        )
        .with_run_interval(config.poll_interval),
    );

    poller.initialize().await?;
    tracing::info!("poller initialized");

    if let Some(handle) = Arc::clone(&poller).run().await {
        _ = handle.await;
    }

    Ok(())
}
