//! Transition detection and the per-channel action policy: which channels newly
//! became live this cycle, and what to do about each one.

use chrono::Utc;

use crate::constants::DELAY_AFTER_OPEN;
use crate::kick::KickChannel;
use crate::kick::channel::slug_from_tab_url;
use crate::poller::{CycleState, Poller, PollerResult};
use crate::surface::{Audio, Notifier, SoundCue, Tabs};

impl Poller {
    /// Diffs the fetched channels against the previous live-set and runs the
    /// action ladder for every becomes-live transition, in fetch order.
    ///
    /// Surface failures (notification, tab, audio) are logged per channel and
    /// never abort the remaining channels; store and fetch failures propagate
    /// to the cycle boundary.
    pub(crate) async fn check_channels(
        &self,
        state: &mut CycleState,
        channels: &[KickChannel],
    ) -> PollerResult<()> {
        if state.last_check.is_none() {
            // Skip notifications and auto-open on the first check; it only
            // seeds the baseline so a process start never triggers a storm.
            state.last_check = Some(Utc::now());
            state.live_slugs = live_slug_set(channels);
            return Ok(());
        }
        state.last_check = Some(Utc::now());

        let show_notification = self.settings.show_notification().await?;
        let is_suspended = self.settings.is_suspended().await?;
        let volume = self.settings.sound_volume().await?;

        let mut acted = false;
        for channel in channels {
            tracing::trace!(
                slug = %channel.slug,
                username = %channel.username,
                is_live = channel.is_live,
                "found following channel"
            );

            let becomes_live = channel.is_live && !state.live_slugs.contains(&channel.slug);
            if !becomes_live {
                continue;
            }

            if acted {
                tracing::debug!(delay = ?DELAY_AFTER_OPEN, "pacing delay before next action");
                tokio::time::sleep(DELAY_AFTER_OPEN).await;
            }

            if show_notification {
                self.show_notification(state, channel).await;
            }

            if is_suspended {
                tracing::debug!(slug = %channel.slug, "suspended, no auto-open or sound");
                continue;
            }

            if self.should_auto_open(channel).await? {
                if let Err(e) = self.tabs.open_tab(&channel.canonical_url()).await {
                    tracing::warn!(error = %e, slug = %channel.slug, "failed to open tab");
                }
                if let Err(e) = self.audio.play(SoundCue::NewLiveMain, volume).await {
                    tracing::warn!(error = %e, "failed to play main cue");
                }
            } else if show_notification {
                if let Err(e) = self.audio.play(SoundCue::NewLiveSub, volume).await {
                    tracing::warn!(error = %e, "failed to play sub cue");
                }
            }

            acted = true;
        }

        state.live_slugs = live_slug_set(channels);
        Ok(())
    }

    async fn show_notification(&self, state: &mut CycleState, channel: &KickChannel) {
        let title = format!("{} started streaming", channel.username);
        let body = channel.session_title.clone().unwrap_or_else(|| "-".to_string());

        match self.notifier.notify(&title, &body).await {
            Ok(id) => {
                tracing::debug!(notification_id = %id, slug = %channel.slug, "notification created");
                state.notified_lives.insert(id, channel.canonical_url());
            }
            Err(e) => {
                tracing::warn!(error = %e, slug = %channel.slug, "failed to show notification");
            }
        }
    }

    async fn should_auto_open(&self, channel: &KickChannel) -> PollerResult<bool> {
        let is_target = self.settings.is_auto_open_channel(&channel.slug).await?;
        let tab_guard = self.settings.duplicate_tab_guard().await?;
        let already_opened = self
            .open_channel_slugs()
            .await
            .iter()
            .any(|slug| *slug == channel.slug);

        let should_open = is_target && (!tab_guard || !already_opened);
        tracing::debug!(
            slug = %channel.slug,
            is_target,
            tab_guard,
            already_opened,
            should_open,
            "auto-open decision"
        );

        Ok(should_open)
    }

    /// Slugs of channel tabs currently open, by exact canonical-URL match. A
    /// sub-page tab (`/<slug>/schedule`) does not count as an open channel tab.
    async fn open_channel_slugs(&self) -> Vec<String> {
        let urls = match self.tabs.tab_urls().await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list open tabs");
                Vec::new()
            }
        };

        urls.iter()
            .filter_map(|url| slug_from_tab_url(url))
            .map(str::to_string)
            .collect()
    }
}

fn live_slug_set(channels: &[KickChannel]) -> std::collections::HashSet<String> {
    channels
        .iter()
        .filter(|channel| channel.is_live)
        .map(|channel| channel.slug.clone())
        .collect()
}
