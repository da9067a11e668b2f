//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stderr tracing subscriber filtered at `level`.
///
/// The `RUST_LOG` environment variable, when set, takes precedence over the
/// supplied default level.
///
/// # Initialization Behavior
///
/// Idempotent: only the first call in a process takes effect. A subscriber
/// installed elsewhere (the host application's, a test harness's) wins
/// silently.
///
/// # Example
///
/// ```rust
/// formweaver::observability::init_tracing("info");
/// tracing::debug!("suppressed at info level");
/// ```
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}
