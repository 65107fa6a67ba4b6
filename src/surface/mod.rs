pub mod console;
#[cfg(test)]
pub mod testing;

use core::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use console::{ConsoleAudio, ConsoleBadge, ConsoleNotifier, ConsoleTabs};

pub type SurfaceResult<T> = core::result::Result<T, SurfaceErr>;

#[derive(Debug, Error)]
pub enum SurfaceErr {
    #[error("message delivery failure: {0}")]
    Delivery(String),
}

/// The two cues the action policy can play: `Primary` accompanies an auto-opened
/// tab, `Secondary` a notification-only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    NewLiveMain,
    NewLiveSub,
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundCue::NewLiveMain => write!(f, "new_live_main"),
            SoundCue::NewLiveSub => write!(f, "new_live_sub"),
        }
    }
}

/// Notification presentation surface. The id is assigned by the surface at
/// creation time and becomes known only once the call resolves.
#[async_trait]
pub trait Notifier: Send + Sync + fmt::Debug {
    async fn notify(&self, title: &str, body: &str) -> SurfaceResult<String>;
}

/// Tab/window management surface.
#[async_trait]
pub trait Tabs: Send + Sync + fmt::Debug {
    async fn open_tab(&self, url: &str) -> SurfaceResult<()>;
    async fn tab_urls(&self) -> SurfaceResult<Vec<String>>;
}

/// Audio playback surface. The playback context is created lazily and kept warm
/// by a periodic keepalive so it survives between cues.
#[async_trait]
pub trait Audio: Send + Sync + fmt::Debug {
    async fn play(&self, cue: SoundCue, volume: f64) -> SurfaceResult<()>;
    async fn start_keepalive(&self) -> SurfaceResult<()>;
}

/// Live-count badge surface.
#[async_trait]
pub trait Badge: Send + Sync + fmt::Debug {
    async fn set_count(&self, count: usize) -> SurfaceResult<()>;
    async fn set_background(&self, hex: &str) -> SurfaceResult<()>;
}
