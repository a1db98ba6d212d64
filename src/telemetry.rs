//! Tracing subscriber set-up for binaries embedding the client.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "STUDIOFLOW_LOG";

/// Resolves the effective filter: `STUDIOFLOW_LOG` first, then the supplied
/// fallback directive, then `info`.
#[must_use]
pub fn resolve_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a formatted subscriber writing to stderr.
///
/// Calling this twice is harmless; the second installation is ignored and
/// reported at debug level through the already installed subscriber.
pub fn init(fallback: &str) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(fallback))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(err) = result {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}
