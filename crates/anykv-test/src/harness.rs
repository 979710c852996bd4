//! Test harness helpers.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Respects `RUST_LOG`; defaults to `warn`. Safe to call from every test.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
