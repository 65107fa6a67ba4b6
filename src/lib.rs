pub mod config;
pub mod constants;
pub mod kick;
pub mod poller;
pub mod store;
pub mod surface;
pub mod util;
