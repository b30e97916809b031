//! Telemetry stores for per-query search metrics and user feedback.

mod memory;
mod sqlite;

use std::path::Path;
use std::sync::Arc;

pub use memory::InMemoryTelemetryStore;
pub use sqlite::SqliteTelemetryStore;

use talent_core::config::EvaluationConfig;
use talent_core::errors::TalentResult;
use talent_core::traits::ITelemetryStore;
use tracing::info;

/// Open the configured telemetry store: SQLite at `telemetry_db_path`, or
/// an in-memory store when no path is set.
pub fn open_telemetry_store(config: &EvaluationConfig) -> TalentResult<Arc<dyn ITelemetryStore>> {
    match config.telemetry_db_path.as_deref() {
        Some(path) => {
            let store = SqliteTelemetryStore::open(Path::new(path))?;
            info!(path, "sqlite telemetry store ready");
            Ok(Arc::new(store))
        }
        None => {
            info!("in-memory telemetry store ready");
            Ok(Arc::new(InMemoryTelemetryStore::new()))
        }
    }
}
