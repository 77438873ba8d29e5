//! Logging setup for the resqa binary

use tracing_subscriber::EnvFilter;

/// Variable checked before `RUST_LOG`
pub const LOG_ENV: &str = "RESQA_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Directives from `RESQA_LOG`, then `RUST_LOG`, then the `info` default
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for reports. Returns false if a subscriber was already installed.
pub fn init(json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };

    result.is_ok()
}
