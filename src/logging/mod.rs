//! Logging initialization with environment-based formatters
//!
//! - Production: structured JSON logs
//! - Anything else: colorful, human-readable logs

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set. HTTP client internals stay quiet.
const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

/// Initialize the global subscriber for the given environment name
pub fn init_logging(environment: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if is_production(environment) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    }
}
