//! Log capture for tests.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to the application.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a debug-level subscriber writing to the test harness.
///
/// Safe to call from every test; only the first call installs.
pub(crate) fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
