/// Telemetry persistence errors. Logged and swallowed by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("telemetry store missing: {table}")]
    StoreMissing { table: String },

    #[error("telemetry write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("invalid feedback: {reason}")]
    InvalidFeedback { reason: String },
}
