use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::instrument;

use crate::store::{KvStore, StoreResult};

const SHOW_NOTIFICATION_KEY: &str = "showNotification";
const SOUND_VOLUME_KEY: &str = "soundVolume";
const SUSPEND_FROM_DATE_KEY: &str = "suspendFromDate";
const DUPLICATE_TAB_GUARD_KEY: &str = "duplicateTabGuard";
const AUTO_OPEN_CHANNELS_KEY: &str = "autoOpenChannels";
const AUTO_UNMUTE_KEY: &str = "autoUnmute";

/// Typed accessors over the durable key/value store. Each flag is a single
/// independent key; defaults live here and are returned whenever a key has
/// never been written (or holds a value of the wrong shape).
#[derive(Debug, Clone)]
pub struct Settings {
    store: Arc<dyn KvStore>,
}

impl Settings {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Whether becomes-live notifications are shown at all. Defaults on.
    pub async fn show_notification(&self) -> StoreResult<bool> {
        Ok(self
            .store
            .get(SHOW_NOTIFICATION_KEY)
            .await?
            .and_then(|value| value.as_bool())
            .unwrap_or(true))
    }

    pub async fn set_show_notification(&self, value: bool) -> StoreResult<()> {
        self.store.set(SHOW_NOTIFICATION_KEY, json!(value)).await
    }

    /// Playback volume for both sound cues, in `[0, 1]`. Defaults to full volume.
    pub async fn sound_volume(&self) -> StoreResult<f64> {
        Ok(self
            .store
            .get(SOUND_VOLUME_KEY)
            .await?
            .and_then(|value| value.as_f64())
            .unwrap_or(1.0))
    }

    pub async fn set_sound_volume(&self, value: f64) -> StoreResult<()> {
        self.store.set(SOUND_VOLUME_KEY, json!(value)).await
    }

    /// The suspension marker. Suspension is presence/absence only: the stored
    /// timestamp records when suspension began and is never compared against
    /// the clock, so it does not auto-expire.
    pub async fn suspend_from(&self) -> StoreResult<Option<DateTime<Utc>>> {
        Ok(self
            .store
            .get(SUSPEND_FROM_DATE_KEY)
            .await?
            .and_then(|value| value.as_str().map(str::to_string))
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc)))
    }

    pub async fn set_suspend_from(&self, date: Option<DateTime<Utc>>) -> StoreResult<()> {
        match date {
            Some(date) => {
                self.store
                    .set(SUSPEND_FROM_DATE_KEY, json!(date.to_rfc3339()))
                    .await
            }
            None => self.store.remove(SUSPEND_FROM_DATE_KEY).await,
        }
    }

    pub async fn is_suspended(&self) -> StoreResult<bool> {
        Ok(self.store.get(SUSPEND_FROM_DATE_KEY).await?.is_some())
    }

    /// Whether auto-open is suppressed when a channel tab already exists.
    /// Defaults on.
    pub async fn duplicate_tab_guard(&self) -> StoreResult<bool> {
        Ok(self
            .store
            .get(DUPLICATE_TAB_GUARD_KEY)
            .await?
            .and_then(|value| value.as_bool())
            .unwrap_or(true))
    }

    pub async fn set_duplicate_tab_guard(&self, value: bool) -> StoreResult<()> {
        self.store.set(DUPLICATE_TAB_GUARD_KEY, json!(value)).await
    }

    /// Slugs whose becomes-live transition should open a tab automatically.
    pub async fn auto_open_channels(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .store
            .get(AUTO_OPEN_CHANNELS_KEY)
            .await?
            .and_then(|value| serde_json::from_value::<Vec<String>>(value).ok())
            .unwrap_or_default())
    }

    pub async fn is_auto_open_channel(&self, slug: &str) -> StoreResult<bool> {
        Ok(self
            .auto_open_channels()
            .await?
            .iter()
            .any(|entry| entry == slug))
    }

    #[instrument(skip(self))]
    pub async fn set_auto_open_channel(&self, slug: &str, enabled: bool) -> StoreResult<()> {
        let mut channels = self.auto_open_channels().await?;
        let currently_enabled = channels.iter().any(|entry| entry == slug);

        if enabled == currently_enabled {
            // already set
            return Ok(());
        }

        match enabled {
            true => channels.push(slug.to_string()),
            false => channels.retain(|entry| entry != slug),
        }

        self.store
            .set(AUTO_OPEN_CHANNELS_KEY, Value::from(channels))
            .await
    }

    /// Consumed by the content-script collaborator, not by the poller. Defaults
    /// off.
    pub async fn auto_unmute(&self) -> StoreResult<bool> {
        Ok(self
            .store
            .get(AUTO_UNMUTE_KEY)
            .await?
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    pub async fn set_auto_unmute(&self, value: bool) -> StoreResult<()> {
        self.store.set(AUTO_UNMUTE_KEY, json!(value)).await
    }
}
