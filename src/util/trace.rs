use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "kick_fan=debug,info";

/// Installs the global subscriber: env-filtered fmt output with targets and
/// line numbers. `RUST_LOG` overrides the default filter.
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(
            fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();
}
