//! SQLite-backed telemetry store.
//!
//! `search_metrics` holds one row per query id (upsert on conflict);
//! `user_feedback` holds the latest feedback per query id and may
//! reference queries that were never logged.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use talent_core::errors::{TalentError, TalentResult, TelemetryError};
use talent_core::models::{
    EvaluationMetrics, QueryId, QueryType, RetrievalMethod, SearchMetrics, UserFeedback,
};
use talent_core::traits::ITelemetryStore;
use tracing::debug;

use crate::to_telemetry_err;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS search_metrics (
        query_id            TEXT PRIMARY KEY,
        query_text          TEXT NOT NULL,
        query_type          TEXT NOT NULL,
        method              TEXT NOT NULL,
        result_count        INTEGER NOT NULL DEFAULT 0,
        average_match_score REAL NOT NULL DEFAULT 0,
        top_match_score     REAL NOT NULL DEFAULT 0,
        response_time_ms    INTEGER NOT NULL DEFAULT 0,
        evaluation          TEXT,
        created_at          TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_search_metrics_created ON search_metrics(created_at);
    CREATE INDEX IF NOT EXISTS idx_search_metrics_type ON search_metrics(query_type);

    CREATE TABLE IF NOT EXISTS user_feedback (
        query_id     TEXT PRIMARY KEY,
        rating       INTEGER NOT NULL,
        payload      TEXT NOT NULL,
        submitted_at TEXT NOT NULL
    );
";

const SELECT_METRICS: &str = "
    SELECT m.query_id, m.query_text, m.query_type, m.method, m.result_count,
           m.average_match_score, m.top_match_score, m.response_time_ms,
           m.evaluation, m.created_at, f.payload
    FROM search_metrics m
    LEFT JOIN user_feedback f ON f.query_id = m.query_id
";

pub struct SqliteTelemetryStore {
    conn: Mutex<Connection>,
}

impl SqliteTelemetryStore {
    /// Open a file-backed store, creating tables if needed.
    pub fn open(path: &Path) -> TalentResult<Self> {
        let conn = Connection::open(path).map_err(to_telemetry_err)?;
        Self::with_connection(conn, true)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> TalentResult<Self> {
        let conn = Connection::open_in_memory().map_err(to_telemetry_err)?;
        Self::with_connection(conn, true)
    }

    /// Wrap an existing connection without creating tables.
    pub fn from_connection(conn: Connection) -> TalentResult<Self> {
        Self::with_connection(conn, false)
    }

    fn with_connection(conn: Connection, migrate: bool) -> TalentResult<Self> {
        if migrate {
            conn.execute_batch(SCHEMA).map_err(to_telemetry_err)?;
            debug!("telemetry schema ready");
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> TalentResult<T>) -> TalentResult<T> {
        let conn = self.conn.lock().map_err(|_| {
            TalentError::from(TelemetryError::WriteFailed {
                reason: "telemetry connection lock poisoned".to_string(),
            })
        })?;
        f(&conn)
    }

    /// Count feedback rows, including those for queries never logged.
    pub fn feedback_count(&self) -> TalentResult<usize> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM user_feedback", [], |r| r.get::<_, i64>(0))
                .map(|n| n as usize)
                .map_err(to_telemetry_err)
        })
    }
}

fn timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn upsert_feedback(conn: &Connection, query_id: &QueryId, fb: &UserFeedback) -> TalentResult<()> {
    let payload = serde_json::to_string(fb)?;
    conn.execute(
        "INSERT INTO user_feedback (query_id, rating, payload, submitted_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(query_id) DO UPDATE SET
            rating = excluded.rating,
            payload = excluded.payload,
            submitted_at = excluded.submitted_at",
        params![
            query_id.as_str(),
            fb.rating(),
            payload,
            timestamp(&fb.submitted_at())
        ],
    )
    .map_err(to_telemetry_err)?;
    Ok(())
}

/// Raw row values; JSON columns are decoded after the row closure returns.
struct MetricsRow {
    query_id: String,
    query_text: String,
    query_type: String,
    method: String,
    result_count: i64,
    average_match_score: f64,
    top_match_score: f64,
    response_time_ms: i64,
    evaluation: Option<String>,
    created_at: String,
    feedback: Option<String>,
}

impl MetricsRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            query_id: row.get(0)?,
            query_text: row.get(1)?,
            query_type: row.get(2)?,
            method: row.get(3)?,
            result_count: row.get(4)?,
            average_match_score: row.get(5)?,
            top_match_score: row.get(6)?,
            response_time_ms: row.get(7)?,
            evaluation: row.get(8)?,
            created_at: row.get(9)?,
            feedback: row.get(10)?,
        })
    }

    fn decode(self) -> TalentResult<SearchMetrics> {
        let evaluation: Option<EvaluationMetrics> = self
            .evaluation
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let feedback: Option<UserFeedback> = self
            .feedback
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        Ok(SearchMetrics {
            query_id: QueryId(self.query_id),
            query_text: self.query_text,
            query_type: QueryType::parse(&self.query_type),
            method: RetrievalMethod::parse(&self.method).unwrap_or(RetrievalMethod::Hybrid),
            result_count: self.result_count.max(0) as usize,
            average_match_score: self.average_match_score,
            top_match_score: self.top_match_score,
            response_time_ms: self.response_time_ms.max(0) as u64,
            evaluation,
            feedback,
            created_at: parse_timestamp(&self.created_at),
        })
    }
}

impl ITelemetryStore for SqliteTelemetryStore {
    fn append(&self, metrics: &SearchMetrics) -> TalentResult<()> {
        let evaluation = metrics
            .evaluation
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO search_metrics (
                    query_id, query_text, query_type, method, result_count,
                    average_match_score, top_match_score, response_time_ms,
                    evaluation, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(query_id) DO UPDATE SET
                    query_text = excluded.query_text,
                    query_type = excluded.query_type,
                    method = excluded.method,
                    result_count = excluded.result_count,
                    average_match_score = excluded.average_match_score,
                    top_match_score = excluded.top_match_score,
                    response_time_ms = excluded.response_time_ms,
                    evaluation = excluded.evaluation",
                params![
                    metrics.query_id.as_str(),
                    metrics.query_text,
                    metrics.query_type.as_str(),
                    metrics.method.as_str(),
                    metrics.result_count as i64,
                    metrics.average_match_score,
                    metrics.top_match_score,
                    metrics.response_time_ms as i64,
                    evaluation,
                    timestamp(&metrics.created_at),
                ],
            )
            .map_err(to_telemetry_err)?;
            if let Some(fb) = &metrics.feedback {
                upsert_feedback(conn, &metrics.query_id, fb)?;
            }
            Ok(())
        })
    }

    fn attach_feedback(&self, query_id: &QueryId, feedback: &UserFeedback) -> TalentResult<()> {
        self.with_conn(|conn| upsert_feedback(conn, query_id, feedback))
    }

    fn get(&self, query_id: &QueryId) -> TalentResult<Option<SearchMetrics>> {
        let row = self.with_conn(|conn| {
            conn.query_row(
                &format!("{SELECT_METRICS} WHERE m.query_id = ?1"),
                params![query_id.as_str()],
                MetricsRow::read,
            )
            .optional()
            .map_err(to_telemetry_err)
        })?;
        row.map(MetricsRow::decode).transpose()
    }

    fn list_since(&self, since: DateTime<Utc>) -> TalentResult<Vec<SearchMetrics>> {
        let rows = self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "{SELECT_METRICS} WHERE m.created_at >= ?1 ORDER BY m.created_at, m.query_id"
                ))
                .map_err(to_telemetry_err)?;
            let rows = stmt
                .query_map(params![timestamp(&since)], MetricsRow::read)
                .map_err(to_telemetry_err)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(to_telemetry_err)?;
            Ok(rows)
        })?;
        rows.into_iter().map(MetricsRow::decode).collect()
    }
}
