use core::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;

use crate::constants::{FOLLOWED_CHANNELS_PATH, MAX_PAGES};
use crate::kick::channel::{ChannelsPayload, KickChannel, KickChannelPage};

pub type ApiResult<T> = core::result::Result<T, ApiErr>;

#[derive(Debug, Error)]
pub enum ApiErr {
    #[error("reqwest error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("non-success response from followed-channels endpoint: {0}")]
    Status(reqwest::StatusCode),
}

/// Capability seam over the remote followed-channels listing. The poller and the
/// (out-of-scope) popup flows consume this trait; tests swap in a double.
#[async_trait]
pub trait KickApi: Send + Sync + fmt::Debug {
    /// All currently-live followed channels, in upstream order.
    async fn live_channels(&self) -> ApiResult<Vec<KickChannel>>;

    /// One page of the followed-channels listing. `None` fetches the first page.
    async fn following_page(&self, cursor: Option<u64>) -> ApiResult<KickChannelPage>;
}

#[derive(Debug, Clone)]
pub struct HttpKickApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpKickApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl KickApi for HttpKickApi {
    #[instrument(skip(self))]
    async fn live_channels(&self) -> ApiResult<Vec<KickChannel>> {
        let mut channels = Vec::new();
        let mut cursor: Option<u64> = None;
        let mut pages = 0;

        loop {
            let page = self.following_page(cursor).await?;
            pages += 1;

            let has_offline = page.channels.iter().any(|channel| !channel.is_live);
            channels.extend(page.channels.into_iter().filter(|channel| channel.is_live));

            // Upstream places live channels before offline ones, so the first
            // offline entry means no further live channels can appear. Unverified
            // against the API contract; if the ordering ever changes, live channels
            // past this point are silently missed.
            if has_offline {
                tracing::debug!(pages, "offline channel seen, stopping pagination");
                break;
            }

            cursor = match page.next_cursor {
                Some(next) => Some(next),
                None => break,
            };

            if pages >= MAX_PAGES {
                tracing::warn!(pages, "page ceiling reached, stopping pagination");
                break;
            }
        }

        tracing::debug!(live_count = channels.len(), pages, "live channel fetch complete");
        Ok(channels)
    }

    #[instrument(skip(self))]
    async fn following_page(&self, cursor: Option<u64>) -> ApiResult<KickChannelPage> {
        let mut url = format!("{}{}", self.base_url, FOLLOWED_CHANNELS_PATH);
        if let Some(cursor) = cursor {
            url.push_str(&format!("?cursor={}", cursor));
        }

        let res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            tracing::error!(code = %res.status(), "non-success response");
            return Err(ApiErr::Status(res.status()));
        }

        let payload = res.json::<ChannelsPayload>().await?;
        Ok(KickChannelPage {
            next_cursor: payload.next_cursor,
            channels: payload.channels.into_iter().map(KickChannel::from).collect(),
        })
    }
}
