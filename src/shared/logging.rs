//! Tracing setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when it is set and parses; otherwise `default` applies
pub fn env_filter(rust_log: Option<&str>, default: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

pub fn init_tracing(default: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref(), default))
        .init();
}
