//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Take the log level from `RUST_LOG`, falling back to config

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn default_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::new(format!("cardano_cli_facade={}", config.log_level))
}
