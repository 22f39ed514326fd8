// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared test helpers.

use tracing_subscriber::EnvFilter;

/// Install a log subscriber honoring `RUST_LOG`; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
