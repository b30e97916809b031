//! # talent-storage
//!
//! Read-only candidate stores for the retrieval pipeline, compilation of
//! filter trees to pgvector SQL, and telemetry persistence.

pub mod memory;
pub mod sql;
pub mod telemetry;

pub use memory::MemoryCandidateStore;
pub use telemetry::{open_telemetry_store, InMemoryTelemetryStore, SqliteTelemetryStore};

use talent_core::errors::{TalentError, TelemetryError};

const MISSING_TABLE: &str = "no such table: ";

/// Map a SQLite error to a telemetry error, flagging missing tables.
pub(crate) fn to_telemetry_err(e: rusqlite::Error) -> TalentError {
    let message = e.to_string();
    if let Some(idx) = message.find(MISSING_TABLE) {
        return TelemetryError::StoreMissing {
            table: message[idx + MISSING_TABLE.len()..].trim().to_string(),
        }
        .into();
    }
    TelemetryError::WriteFailed { reason: message }.into()
}
