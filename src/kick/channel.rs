use serde::{Deserialize, Serialize};

use crate::constants::KICK_BASE_URL;

/// One followed channel as observed at poll time. Identity across polls is by
/// `slug` alone; every other field may change cycle-to-cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KickChannel {
    pub slug: String,
    pub is_live: bool,
    pub username: String,
    pub session_title: Option<String>,
    pub category_name: String,
    pub viewer_count: u64,
    pub profile_picture: Option<String>,
}

impl KickChannel {
    /// Canonical channel URL, no trailing path.
    pub fn canonical_url(&self) -> String {
        format!("{}/{}", KICK_BASE_URL, self.slug)
    }
}

/// One page of the followed-channels listing plus the cursor for the next page
/// (`None` once the listing is exhausted).
#[derive(Debug, Clone)]
pub struct KickChannelPage {
    pub channels: Vec<KickChannel>,
    pub next_cursor: Option<u64>,
}

/// Wire model for `GET /api/v2/channels/followed`.
#[derive(Debug, Deserialize)]
pub struct ChannelsPayload {
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<u64>,
    pub channels: Vec<ChannelRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelRecord {
    pub is_live: bool,
    pub profile_picture: Option<String>,
    pub channel_slug: String,
    #[serde(default)]
    pub viewer_count: u64,
    #[serde(default)]
    pub category_name: String,
    pub user_username: String,
    pub session_title: Option<String>,
}

impl From<ChannelRecord> for KickChannel {
    fn from(record: ChannelRecord) -> Self {
        Self {
            slug: record.channel_slug,
            is_live: record.is_live,
            username: record.user_username,
            session_title: record.session_title,
            category_name: record.category_name,
            viewer_count: record.viewer_count,
            profile_picture: record.profile_picture,
        }
    }
}

/// Extracts the channel slug from a tab URL, matching only the canonical form.
///
/// `https://kick.com/chippoiwatashi` and the same with a trailing slash match;
/// sub-pages like `https://kick.com/chippoiwatashi/schedule` do not, so an open
/// schedule page never counts as an already-open channel tab.
pub fn slug_from_tab_url(url: &str) -> Option<&str> {
    let rest = url.strip_prefix(KICK_BASE_URL)?.strip_prefix('/')?;
    let slug = rest.strip_suffix('/').unwrap_or(rest);

    if slug.is_empty() || slug.contains('/') {
        return None;
    }

    Some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(slug: &str) -> KickChannel {
        KickChannel {
            slug: slug.to_string(),
            is_live: true,
            username: slug.to_string(),
            session_title: None,
            category_name: String::new(),
            viewer_count: 0,
            profile_picture: None,
        }
    }

    #[test]
    fn test_canonical_url_has_no_trailing_path() {
        assert_eq!(
            channel("kurosawa2525").canonical_url(),
            "https://kick.com/kurosawa2525"
        );
    }

    #[test]
    fn test_slug_from_tab_url_matches_canonical_forms() {
        assert_eq!(
            slug_from_tab_url("https://kick.com/chippoiwatashi"),
            Some("chippoiwatashi")
        );
        assert_eq!(
            slug_from_tab_url("https://kick.com/chippoiwatashi/"),
            Some("chippoiwatashi")
        );
    }

    #[test]
    fn test_slug_from_tab_url_rejects_subpages_and_foreign_urls() {
        assert_eq!(slug_from_tab_url("https://kick.com/chippoiwatashi/schedule"), None);
        assert_eq!(slug_from_tab_url("https://kick.com/a//"), None);
        assert_eq!(slug_from_tab_url("https://kick.com/"), None);
        assert_eq!(slug_from_tab_url("https://kick.com"), None);
        assert_eq!(slug_from_tab_url("https://example.com/chippoiwatashi"), None);
    }

    #[test]
    fn test_channel_record_deserializes_real_payload_shape() {
        let raw = r#"{
            "nextCursor": 5,
            "channels": [
                {
                    "is_live": true,
                    "profile_picture": null,
                    "channel_slug": "kurosawa2525",
                    "viewer_count": 274,
                    "category_name": "Just Chatting",
                    "user_username": "kurosawa2525",
                    "session_title": "morning zatsudan"
                },
                {
                    "is_live": false,
                    "profile_picture": "https://files.kick.com/images/user/9201758/profile.webp",
                    "channel_slug": "220ninimaru",
                    "viewer_count": 0,
                    "category_name": "",
                    "user_username": "220ninimaru",
                    "session_title": null
                }
            ]
        }"#;

        let payload: ChannelsPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.next_cursor, Some(5));
        assert_eq!(payload.channels.len(), 2);

        let first = KickChannel::from(
            payload.channels.into_iter().next().unwrap(),
        );
        assert!(first.is_live);
        assert_eq!(first.slug, "kurosawa2525");
        assert_eq!(first.viewer_count, 274);
        assert_eq!(first.session_title.as_deref(), Some("morning zatsudan"));
    }
}
