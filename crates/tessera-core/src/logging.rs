/// Install a `tracing` fmt subscriber with Tessera's default filter.
///
/// `RUST_LOG` takes precedence when set.
pub fn init() {
    init_with_filter("info,tessera_geometry=debug,tessera_text=debug");
}

/// Install a `tracing` fmt subscriber with a custom default filter.
///
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_with_filter(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
