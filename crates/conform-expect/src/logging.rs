//! # Test Logging
//!
//! Matchers emit `tracing` events (`trace` when a matcher runs, `debug` when
//! it raises). Tests that want to see them call [`init_test_tracing`] and
//! set `RUST_LOG`, e.g. `RUST_LOG=conform_matcher=trace cargo test`.

use tracing_subscriber::EnvFilter;

/// Install a test-friendly `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test: only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
