//! Tracing initialisation for the sync service.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber. Call once at startup.
///
/// `directives` is an `EnvFilter` string, typically `SyncConfig::log_level`
/// (e.g. `"info"` or `"info,marketsync_sync=debug"`). An unparsable string
/// falls back to `"info"` rather than failing startup.
pub fn init_tracing(directives: &str, json: bool) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
