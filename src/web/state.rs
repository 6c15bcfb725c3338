//! Shared state for the web API

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::catalog::SuiteCatalog;
use crate::sim::{RunPayload, SuiteSimulator};
use crate::storage::{JsonFileStore, RunRecord, SnapshotRecord, SnapshotStore, StorageError};

/// Application state shared across all handlers.
///
/// The store sits behind a mutex so concurrent requests for the same
/// suite serialize their snapshot writes; the simulator itself is pure.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Static suite registry
    pub catalog: Arc<SuiteCatalog>,
    /// Snapshot and run-record storage
    store: Arc<Mutex<JsonFileStore>>,
    /// Threshold recorded on runs when the caller supplies none
    pub default_threshold: Option<f64>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, default_threshold: Option<f64>) -> Self {
        Self {
            catalog: Arc::new(SuiteCatalog::builtin()),
            store: Arc::new(Mutex::new(JsonFileStore::new(data_dir))),
            default_threshold,
        }
    }

    /// Current snapshot for a suite, simulating one on first access.
    pub async fn snapshot(&self, suite: &str) -> Result<SnapshotRecord, StorageError> {
        let store = self.store.lock().await;
        if let Some(record) = store.get_snapshot(suite)? {
            return Ok(record);
        }

        info!("No snapshot for suite '{}', generating one", suite);
        self.run_locked(&store, suite, self.default_threshold)?;
        // The upsert above always leaves a snapshot behind.
        let record = store.get_snapshot(suite)?.expect("snapshot just written");
        Ok(record)
    }

    /// Run a fresh simulation for a suite and persist it.
    pub async fn run_suite(
        &self,
        suite: &str,
        threshold: Option<f64>,
    ) -> Result<RunPayload, StorageError> {
        let store = self.store.lock().await;
        self.run_locked(&store, suite, threshold.or(self.default_threshold))
    }

    /// All persisted run records, newest first.
    pub async fn runs(&self) -> Result<Vec<RunRecord>, StorageError> {
        let store = self.store.lock().await;
        store.list_runs()
    }

    fn run_locked(
        &self,
        store: &JsonFileStore,
        suite: &str,
        threshold: Option<f64>,
    ) -> Result<RunPayload, StorageError> {
        let as_of = Utc::now();
        let mut rng = StdRng::from_entropy();
        let simulator = SuiteSimulator::new(&self.catalog);
        let payload = simulator.simulate(suite, threshold, &mut rng, as_of);

        store.upsert_snapshot(suite, &payload)?;
        store.append_run(&RunRecord::from_payload(
            suite,
            &self.catalog.label(suite),
            &payload,
            as_of,
        ))?;

        info!(
            "Simulated suite '{}': {} benchmarks, {} failed",
            suite, payload.summary.total, payload.summary.failed
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_generates_on_first_access() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), None);

        let first = state.snapshot("output").await.unwrap();
        assert_eq!(first.data.summary.total, 3);

        // Second read returns the stored snapshot, not a fresh run.
        let second = state.snapshot("output").await.unwrap();
        assert_eq!(
            first.data.benchmarks[0].success_rate,
            second.data.benchmarks[0].success_rate
        );
        assert_eq!(state.runs().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_suite_appends_a_record_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), Some(0.8));

        state.run_suite("crisis", None).await.unwrap();
        state.run_suite("crisis", Some(0.9)).await.unwrap();

        let runs = state.runs().await.unwrap();
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.suite == "crisis"));
        assert!(runs.iter().all(|r| r.suite_label == "Crisis Command Suite"));
    }

    #[tokio::test]
    async fn test_unknown_suite_yields_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), None);

        let record = state.snapshot("bogus").await.unwrap();
        assert_eq!(record.data.summary.total, 0);
        assert!(record.data.benchmarks.is_empty());
    }
}
