//! Structured logging on standard error.
//!
//! The filter is read from `RUST_LOG`; without it only warnings are shown,
//! so standard output carries the benchmark report alone.
use tracing_subscriber::EnvFilter;


/// Filter used when `RUST_LOG` is unset or malformed.
pub const DEFAULT_FILTER: &str = "warn";


/// Install the global subscriber.
/// Returns `false` if a subscriber was already installed.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
