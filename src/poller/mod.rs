pub mod policy;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::constants::{DEFAULT_BADGE_BACKGROUND_COLOR, RUN_INTERVAL};
use crate::kick::{ApiErr, KickApi};
use crate::store::{Settings, StoreErr};
use crate::surface::{Audio, Badge, Notifier, Tabs};

pub type PollerResult<T> = core::result::Result<T, PollerErr>;

#[derive(Debug, Error)]
pub enum PollerErr {
    #[error(transparent)]
    Api(#[from] ApiErr),

    #[error(transparent)]
    Store(#[from] StoreErr),
}

/// Mutable poll state, owned by the [`Poller`] behind one mutex. The mutex
/// doubles as the cycle-overlap guard: a tick that finds it held is skipped.
#[derive(Debug, Default)]
struct CycleState {
    /// `None` until the first cycle completes. The first cycle only seeds
    /// `live_slugs`; it never notifies or auto-opens.
    last_check: Option<DateTime<Utc>>,
    /// Slugs observed live in the previous cycle, replaced wholesale each cycle.
    live_slugs: HashSet<String>,
    /// notification-id -> canonical channel URL, for click resolution. Never
    /// evicted; growth is bounded by notification volume, not poll volume.
    notified_lives: HashMap<String, String>,
}

/// Owns the repeating poll loop: fetches the live-set, diffs it against the
/// previous cycle and applies the per-channel action policy (see [`policy`]).
#[derive(Debug)]
pub struct Poller {
    pub(crate) api: Arc<dyn KickApi>,
    pub(crate) settings: Settings,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) tabs: Arc<dyn Tabs>,
    pub(crate) audio: Arc<dyn Audio>,
    pub(crate) badge: Arc<dyn Badge>,
    run_interval: Duration,
    running: AtomicBool,
    state: Mutex<CycleState>,
}

impl Poller {
    pub fn new(
        api: Arc<dyn KickApi>,
        settings: Settings,
        notifier: Arc<dyn Notifier>,
        tabs: Arc<dyn Tabs>,
        audio: Arc<dyn Audio>,
        badge: Arc<dyn Badge>,
    ) -> Self {
        Self {
            api,
            settings,
            notifier,
            tabs,
            audio,
            badge,
            run_interval: RUN_INTERVAL,
            running: AtomicBool::new(false),
            state: Mutex::new(CycleState::default()),
        }
    }

    /// Overrides the interval between poll cycles (defaults to [`RUN_INTERVAL`]).
    pub fn with_run_interval(mut self, interval: Duration) -> Self {
        self.run_interval = interval;
        self
    }

    /// Startup reset: a leftover suspension marker from a previous process is
    /// cleared and the badge background restored, so a restart never comes up
    /// silently suspended.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> PollerResult<()> {
        self.settings.set_suspend_from(None).await?;

        if let Err(e) = self.badge.set_background(DEFAULT_BADGE_BACKGROUND_COLOR).await {
            tracing::warn!(error = %e, "failed to reset badge background");
        }

        Ok(())
    }

    /// Starts the poll loop: signals the playback context to warm up, runs one
    /// cycle immediately, then drives subsequent cycles from a fixed-interval
    /// timer. Calling `run` while a loop is already running is a logged no-op
    /// returning `None`.
    #[instrument(skip(self))]
    pub async fn run(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::debug!("run: already running");
            return None;
        }
        tracing::info!("run: start");

        if let Err(e) = self.audio.start_keepalive().await {
            tracing::warn!(error = %e, "failed to start playback keepalive");
        }

        self.poll_once().await;

        let poller = Arc::clone(&self);
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poller.run_interval);
            // the immediate cycle above covers the interval's instant first tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                poller.poll_once().await;
            }
        }))
    }

    /// One guarded, error-contained poll cycle. Any failure is logged and
    /// swallowed so the next scheduled tick always fires; a cycle that is still
    /// in flight causes this tick to be skipped rather than overlapped.
    pub async fn poll_once(&self) {
        let Ok(mut state) = self.state.try_lock() else {
            tracing::warn!("previous cycle still in flight, skipping tick");
            return;
        };

        if let Err(e) = self.request_channels(&mut state).await {
            tracing::warn!(error = %e, "failed to request channels");
        }
    }

    #[instrument(skip_all)]
    async fn request_channels(&self, state: &mut CycleState) -> PollerResult<()> {
        tracing::debug!("request channels: start");

        let channels = self.api.live_channels().await?;
        let live_count = channels.iter().filter(|channel| channel.is_live).count();

        if let Err(e) = self.badge.set_count(live_count).await {
            tracing::warn!(error = %e, "failed to update badge count");
        }

        self.check_channels(state, &channels).await?;

        tracing::debug!(live_count, "request channels: end");
        Ok(())
    }

    /// Click-handler entry point: resolves a notification id back to the channel
    /// URL it announced and opens it. An unknown id is a logged no-op.
    #[instrument(skip(self))]
    pub async fn open_notification(&self, notification_id: &str) {
        let url = {
            let state = self.state.lock().await;
            state.notified_lives.get(notification_id).cloned()
        };

        match url {
            Some(url) => {
                if let Err(e) = self.tabs.open_tab(&url).await {
                    tracing::warn!(error = %e, url, "failed to open notification target");
                }
            }
            None => {
                tracing::debug!(notification_id, "no url recorded for notification");
            }
        }
    }
}
