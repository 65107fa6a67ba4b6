#![allow(dead_code)]

//! Recording doubles shared by the unit tests. Each one implements the
//! production trait and remembers every call so assertions can inspect exactly
//! what the poller did.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::kick::{ApiErr, ApiResult, KickApi, KickChannel, KickChannelPage};
use crate::store::{KvStore, StoreResult};
use crate::surface::{Audio, Badge, Notifier, SoundCue, SurfaceErr, SurfaceResult, Tabs};

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Pops one scripted result per `live_channels` call, so a test can lay out an
/// entire sequence of poll cycles up front.
#[derive(Debug, Default)]
pub struct QueuedKickApi {
    cycles: Mutex<VecDeque<ApiResult<Vec<KickChannel>>>>,
    pub calls: AtomicUsize,
}

impl QueuedKickApi {
    pub fn push_cycle(&self, channels: Vec<KickChannel>) {
        self.cycles.lock().unwrap().push_back(Ok(channels));
    }

    pub fn push_failure(&self) {
        self.cycles
            .lock()
            .unwrap()
            .push_back(Err(ApiErr::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)));
    }
}

#[async_trait]
impl KickApi for QueuedKickApi {
    async fn live_channels(&self) -> ApiResult<Vec<KickChannel>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cycles
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn following_page(&self, _cursor: Option<u64>) -> ApiResult<KickChannelPage> {
        Ok(KickChannelPage {
            channels: Vec::new(),
            next_cursor: None,
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<(String, String)>>,
    next_id: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, title: &str, body: &str) -> SurfaceResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SurfaceErr::Delivery("notifier down".to_string()));
        }

        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!("notification-{}", id))
    }
}

#[derive(Debug, Default)]
pub struct RecordingTabs {
    pub open: Mutex<Vec<String>>,
    pub opened: Mutex<Vec<String>>,
}

impl RecordingTabs {
    pub fn with_open(urls: &[&str]) -> Self {
        Self {
            open: Mutex::new(urls.iter().map(|url| url.to_string()).collect()),
            opened: Mutex::default(),
        }
    }
}

#[async_trait]
impl Tabs for RecordingTabs {
    async fn open_tab(&self, url: &str) -> SurfaceResult<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn tab_urls(&self) -> SurfaceResult<Vec<String>> {
        Ok(self.open.lock().unwrap().clone())
    }
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Mutex<Vec<(SoundCue, f64)>>,
    pub keepalive_started: AtomicBool,
}

#[async_trait]
impl Audio for RecordingAudio {
    async fn play(&self, cue: SoundCue, volume: f64) -> SurfaceResult<()> {
        self.played.lock().unwrap().push((cue, volume));
        Ok(())
    }

    async fn start_keepalive(&self) -> SurfaceResult<()> {
        self.keepalive_started.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingBadge {
    pub counts: Mutex<Vec<usize>>,
    pub backgrounds: Mutex<Vec<String>>,
}

impl RecordingBadge {
    pub fn last_count(&self) -> Option<usize> {
        self.counts.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl Badge for RecordingBadge {
    async fn set_count(&self, count: usize) -> SurfaceResult<()> {
        self.counts.lock().unwrap().push(count);
        Ok(())
    }

    async fn set_background(&self, hex: &str) -> SurfaceResult<()> {
        self.backgrounds.lock().unwrap().push(hex.to_string());
        Ok(())
    }
}

pub fn live(slug: &str) -> KickChannel {
    KickChannel {
        slug: slug.to_string(),
        is_live: true,
        username: slug.to_string(),
        session_title: Some(format!("{} stream", slug)),
        category_name: "Just Chatting".to_string(),
        viewer_count: 7,
        profile_picture: None,
    }
}

pub fn offline(slug: &str) -> KickChannel {
    KickChannel {
        slug: slug.to_string(),
        is_live: false,
        username: slug.to_string(),
        session_title: None,
        category_name: String::new(),
        viewer_count: 0,
        profile_picture: None,
    }
}
