//! Shared fixtures for integration tests.

pub mod fixtures;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per test binary, filtered by
/// `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}
