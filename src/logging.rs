use tracing_error::ErrorLayer;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initializes logging for the given deployment environment.
///
/// `production` gets JSON-formatted lines for aggregation; anything else
/// gets pretty console output. `RUST_LOG` overrides the default filter.
pub fn init_logging(app_env: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("link_cleaner=info,sqlx=warn"));

    let registry = Registry::default()
        .with(env_filter)
        .with(ErrorLayer::default());

    if app_env == "production" {
        let json_layer = fmt::layer().json().with_target(true);
        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer().pretty().with_target(true);
        registry.with(fmt_layer).init();
    }

    tracing::info!(env = %app_env, "Logging system initialized");
}

/// Debugging utility for tracking execution time of a block/future.
pub struct Timer {
    label: &'static str,
    start: std::time::Instant,
}

impl Timer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            label = %self.label,
            duration_ms = %duration.as_millis(),
            "Operation completed"
        );
    }
}
