//! Tracing setup: structured JSON logging and named events.

pub mod events;

use talent_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TALENT_LOG";

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `TALENT_LOG` environment variable for filtering.
/// Defaults to `info` level if not set.
pub fn init_tracing() {
    init_tracing_with_config(&ObservabilityConfig::default());
}

/// Initialize tracing from configuration. `TALENT_LOG` still wins over
/// `log_level`. Safe to call more than once; later calls are ignored.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let _ = if config.json_logs {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.compact().try_init()
    };
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init();
}
