//! `tracing` subscriber setup for binaries.

use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `directives`.
///
/// `RUST_LOG` takes precedence when set. Installing twice is a no-op.
pub fn init(directives: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
