//! Opt-in log output for tests.
//!
//! Nothing is printed unless `RUST_LOG` is set, e.g.
//! `RUST_LOG=htmlscript_linter=trace cargo test`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a fmt subscriber writing through the test harness. Safe to call
/// from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
            )
            .with_test_writer()
            .try_init();
    });
}
