//! Tracing-backed surface adapters for the headless binary. Each side effect
//! becomes a structured event, which keeps the poller runnable (and observable)
//! without real browser bindings behind these traits.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument, trace};
use uuid::Uuid;

use crate::surface::{Audio, Badge, Notifier, SoundCue, SurfaceErr, SurfaceResult, Tabs};

const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(20);

#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    #[instrument(skip(self))]
    async fn notify(&self, title: &str, body: &str) -> SurfaceResult<String> {
        let id = Uuid::new_v4().to_string();
        info!(notification_id = %id, title, body, "notification shown");

        Ok(id)
    }
}

/// Tracks the URLs it has opened so the duplicate-tab-guard sees the same view
/// a browser would for tabs this process created.
#[derive(Debug, Default)]
pub struct ConsoleTabs {
    opened: Mutex<Vec<String>>,
}

#[async_trait]
impl Tabs for ConsoleTabs {
    #[instrument(skip(self))]
    async fn open_tab(&self, url: &str) -> SurfaceResult<()> {
        info!(url, "opening tab");
        self.opened
            .lock()
            .map_err(|e| SurfaceErr::Delivery(e.to_string()))?
            .push(url.to_string());

        Ok(())
    }

    async fn tab_urls(&self) -> SurfaceResult<Vec<String>> {
        Ok(self
            .opened
            .lock()
            .map_err(|e| SurfaceErr::Delivery(e.to_string()))?
            .clone())
    }
}

#[derive(Debug, Serialize)]
struct PlayMessage<'a> {
    sound: &'a str,
    volume: f64,
}

#[derive(Debug, Default)]
pub struct ConsoleAudio {
    keepalive_running: AtomicBool,
}

#[async_trait]
impl Audio for ConsoleAudio {
    #[instrument(skip(self))]
    async fn play(&self, cue: SoundCue, volume: f64) -> SurfaceResult<()> {
        let sound = cue.to_string();
        let message = PlayMessage {
            sound: &sound,
            volume,
        };
        let raw = serde_json::to_string(&message)
            .map_err(|e| SurfaceErr::Delivery(e.to_string()))?;

        info!(message = %raw, "sent play-sound message");
        Ok(())
    }

    async fn start_keepalive(&self) -> SurfaceResult<()> {
        if self.keepalive_running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(KEEPALIVE_INTERVAL);
            loop {
                ticker.tick().await;
                trace!("playback context keepalive ping");
            }
        });

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ConsoleBadge;

#[async_trait]
impl Badge for ConsoleBadge {
    async fn set_count(&self, count: usize) -> SurfaceResult<()> {
        info!(count, "badge count updated");
        Ok(())
    }

    async fn set_background(&self, hex: &str) -> SurfaceResult<()> {
        info!(hex, "badge background updated");
        Ok(())
    }
}
