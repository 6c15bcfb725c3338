//! Persistence contract for snapshots and run records.
//!
//! The engine only needs two write operations: replace-or-insert the
//! latest payload per suite, and append one record per simulation
//! invocation. Reads mirror them for the query surface.

mod json_store;

pub use json_store::JsonFileStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::sim::{RunPayload, Summary};

/// Storage failures carry the offending path.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failure at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record at {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The latest stored payload for a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub suite: String,
    pub updated_at: DateTime<Utc>,
    pub data: RunPayload,
}

/// Persisted summary of one simulation invocation; never mutated after
/// being appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: String,
    pub suite: String,
    pub suite_label: String,
    pub requested_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub benchmark_count: u32,
    pub failed: u32,
    pub success: u32,
    pub status: String,
    pub threshold: Option<f64>,
}

impl RunRecord {
    /// Build the run record for a freshly simulated payload.
    pub fn from_payload(
        suite: &str,
        suite_label: &str,
        payload: &RunPayload,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            suite: suite.to_string(),
            suite_label: suite_label.to_string(),
            requested_at,
            generated_at: payload.generated_at,
            summary: payload.summary,
            benchmark_count: payload.summary.total,
            failed: payload.summary.failed,
            success: payload.summary.success,
            status: "completed".to_string(),
            threshold: payload.threshold,
        }
    }
}

/// Durable storage used by the engine's query surface.
pub trait SnapshotStore {
    /// Replace-or-insert the snapshot keyed by suite id.
    fn upsert_snapshot(&self, suite: &str, payload: &RunPayload) -> Result<(), StorageError>;

    /// Latest stored snapshot for a suite, if any.
    fn get_snapshot(&self, suite: &str) -> Result<Option<SnapshotRecord>, StorageError>;

    /// Append one run record; existing records are never touched.
    fn append_run(&self, record: &RunRecord) -> Result<(), StorageError>;

    /// All run records, most recent first.
    fn list_runs(&self) -> Result<Vec<RunRecord>, StorageError>;
}
