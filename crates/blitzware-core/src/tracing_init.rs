//! Shared tracing/logging initialization.
//!
//! Log lines go to stderr so that command output on stdout stays clean
//! for piping.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the global tracing subscriber.
///
/// * `default_filter` -- default `RUST_LOG` value when the env-var is not set
///   (e.g. `"blitzware=warn"`).
/// * `log_json` -- when `true`, emit structured JSON log lines instead of the
///   human-readable format.
pub fn init_tracing(default_filter: &str, log_json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
    );
    if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Build the default filter directive for the given log level.
///
/// Only the `BlitzWare` crates are raised to `level`; dependencies stay at
/// `warn` so that reqwest/hyper connection chatter does not drown out
/// request logs.
pub fn default_filter(level: &str) -> String {
    format!(
        "warn,blitzware={level},blitzware_cli={level},blitzware_core={level},blitzware_client={level}"
    )
}
