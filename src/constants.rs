use std::time::Duration;

pub const KICK_BASE_URL: &str = "https://kick.com";
pub const FOLLOWED_CHANNELS_PATH: &str = "/api/v2/channels/followed";

/// Interval between poll cycles.
pub const RUN_INTERVAL: Duration = Duration::from_secs(60);

/// Wait inserted between consecutive becomes-live actions within one cycle so a
/// burst of transitions doesn't open every tab at once.
pub const DELAY_AFTER_OPEN: Duration = Duration::from_secs(5);

/// Hard ceiling on pages fetched per call, in case the cursor chain misbehaves.
pub const MAX_PAGES: usize = 10;

pub const DEFAULT_BADGE_BACKGROUND_COLOR: &str = "#53fc18";
pub const SUSPENDED_BADGE_BACKGROUND_COLOR: &str = "#757575";
