pub mod api;
pub mod channel;

pub use api::{ApiErr, ApiResult, HttpKickApi, KickApi};
pub use channel::{KickChannel, KickChannelPage};
