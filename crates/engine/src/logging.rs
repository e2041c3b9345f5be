//! Tracing setup for the hosting application.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with an env-filter, defaulting to engine debug output.
///
/// Honors `RUST_LOG` when set. Call once from the hosting application;
/// calling twice panics, as with any global subscriber installation.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mishwar_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
