//! Test-only tracing hook, installed when the test binary starts.
//!
//! `mod init_logging;` in an integration test routes library events (fan-out misses,
//! degraded enrichment, cache refreshes) to the test writer. Filter with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=steam_mcp=debug cargo test -p steam-mcp --test enrichment_tools -- --nocapture
//! ```

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn install_test_subscriber() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("steam_mcp=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
