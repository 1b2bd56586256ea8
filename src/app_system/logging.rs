/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` (normally
/// [`SystemConfig::log_filter`](crate::config::SystemConfig)) is used.
///
/// **Usage:**
/// ```bash
/// RUST_LOG=debug cargo run                          # everything at debug
/// RUST_LOG=order_placement::store=debug cargo run   # only the store
/// ```
pub fn setup_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
