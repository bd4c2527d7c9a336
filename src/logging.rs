use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the stdout logger. `log` records from every layer are forwarded
/// to it, filtered by `RUST_LOG` (`info` when unset).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt().with_env_filter(filter).init();
}
