//! JSON-file-backed store: one file per snapshot, one per run record.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use crate::sim::RunPayload;

use super::{RunRecord, SnapshotRecord, SnapshotStore, StorageError};

/// Stores snapshots under `<root>/snapshots/<suite>.json` and run
/// records under `<root>/runs/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn snapshot_path(&self, suite: &str) -> PathBuf {
        self.root
            .join("snapshots")
            .join(format!("{}.json", slug(suite)))
    }

    fn runs_dir(&self) -> PathBuf {
        self.root.join("runs")
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(value).map_err(|source| {
            StorageError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, content).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Suite ids arrive from URL path params; keep them filename-safe.
fn slug(suite: &str) -> String {
    suite
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl SnapshotStore for JsonFileStore {
    fn upsert_snapshot(&self, suite: &str, payload: &RunPayload) -> Result<(), StorageError> {
        let record = SnapshotRecord {
            suite: suite.to_string(),
            updated_at: Utc::now(),
            data: payload.clone(),
        };
        self.write_json(&self.snapshot_path(suite), &record)
    }

    fn get_snapshot(&self, suite: &str) -> Result<Option<SnapshotRecord>, StorageError> {
        let path = self.snapshot_path(suite);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        let record =
            serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
                path: path.clone(),
                source,
            })?;
        Ok(Some(record))
    }

    fn append_run(&self, record: &RunRecord) -> Result<(), StorageError> {
        let path = self.runs_dir().join(format!("{}.json", slug(&record.id)));
        self.write_json(&path, record)
    }

    fn list_runs(&self) -> Result<Vec<RunRecord>, StorageError> {
        let dir = self.runs_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let entries = fs::read_dir(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().map_or(false, |e| e == "json") {
                match fs::read_to_string(&path) {
                    Ok(content) => match serde_json::from_str::<RunRecord>(&content) {
                        Ok(record) => records.push(record),
                        Err(err) => warn!("Skipping malformed run record {:?}: {}", path, err),
                    },
                    Err(err) => warn!("Skipping unreadable run record {:?}: {}", path, err),
                }
            }
        }

        records.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SuiteCatalog;
    use crate::sim::SuiteSimulator;
    use chrono::{Duration, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn payload(seed: u64) -> RunPayload {
        payload_with_threshold(seed, Some(0.8))
    }

    fn payload_with_threshold(seed: u64, threshold: Option<f64>) -> RunPayload {
        let catalog = SuiteCatalog::builtin();
        let simulator = SuiteSimulator::new(&catalog);
        let mut rng = StdRng::seed_from_u64(seed);
        let as_of = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        simulator.simulate("output", threshold, &mut rng, as_of)
    }

    #[test]
    fn test_snapshot_upsert_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.get_snapshot("output").unwrap().is_none());

        store
            .upsert_snapshot("output", &payload_with_threshold(1, Some(0.8)))
            .unwrap();
        store
            .upsert_snapshot("output", &payload_with_threshold(2, Some(0.95)))
            .unwrap();

        let stored = store.get_snapshot("output").unwrap().unwrap();
        assert_eq!(stored.suite, "output");
        // Replaced, not appended: only the latest payload survives.
        assert_eq!(stored.data.threshold, Some(0.95));
    }

    #[test]
    fn test_run_records_append_and_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let catalog = SuiteCatalog::builtin();

        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        for i in 0..3 {
            let p = payload(i);
            let record = RunRecord::from_payload(
                "output",
                &catalog.label("output"),
                &p,
                base + Duration::minutes(i as i64),
            );
            store.append_run(&record).unwrap();
        }

        let runs = store.list_runs().unwrap();
        assert_eq!(runs.len(), 3);
        assert!(runs[0].requested_at > runs[1].requested_at);
        assert!(runs[1].requested_at > runs[2].requested_at);
        assert_eq!(runs[0].status, "completed");
        assert_eq!(runs[0].benchmark_count, runs[0].summary.total);
    }

    #[test]
    fn test_suite_ids_are_slugged_for_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.upsert_snapshot("../etc/passwd", &payload(3)).unwrap();
        let stored = store.get_snapshot("../etc/passwd").unwrap().unwrap();
        assert_eq!(stored.suite, "../etc/passwd");
        // Nothing escaped the snapshots directory.
        assert!(dir
            .path()
            .join("snapshots")
            .join("--etc-passwd.json")
            .exists());
    }

    #[test]
    fn test_malformed_run_records_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let p = payload(4);
        let record = RunRecord::from_payload("output", "Calculator Demo Suite", &p, Utc::now());
        store.append_run(&record).unwrap();

        std::fs::write(dir.path().join("runs").join("junk.json"), "{not json").unwrap();

        let runs = store.list_runs().unwrap();
        assert_eq!(runs.len(), 1);
    }
}
