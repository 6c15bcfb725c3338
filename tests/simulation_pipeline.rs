//! End-to-end tests for the simulation pipeline
//!
//! Exercises the full flow: catalog resolution -> simulation ->
//! insight/rollup derivation -> JSON persistence -> re-read, using a
//! seeded generator and a temporary data directory throughout.

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bench_sim::catalog::SuiteCatalog;
use bench_sim::scoring::score_prompt;
use bench_sim::sim::{RunPayload, SuiteSimulator};
use bench_sim::storage::{JsonFileStore, RunRecord, SnapshotStore};
use bench_sim::web::AppState;

fn simulate(suite: &str, seed: u64, threshold: Option<f64>) -> RunPayload {
    let catalog = SuiteCatalog::builtin();
    let simulator = SuiteSimulator::new(&catalog);
    let mut rng = StdRng::seed_from_u64(seed);
    let as_of = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    simulator.simulate(suite, threshold, &mut rng, as_of)
}

#[test]
fn all_suite_concatenates_every_template() {
    let catalog = SuiteCatalog::builtin();
    let per_suite: usize = ["output", "custom", "crisis"]
        .iter()
        .map(|s| catalog.templates_for(s).len())
        .sum();

    let payload = simulate("all", 1, None);
    assert_eq!(payload.benchmarks.len(), per_suite);
    assert_eq!(payload.summary.total as usize, per_suite);

    // Fixed suite order: output, custom, crisis.
    let suites: Vec<&str> = payload.benchmarks.iter().map(|b| b.suite.as_str()).collect();
    let first_custom = suites.iter().position(|s| *s == "custom").unwrap();
    let first_crisis = suites.iter().position(|s| *s == "crisis").unwrap();
    assert!(suites[..first_custom].iter().all(|s| *s == "output"));
    assert!(first_custom < first_crisis);
}

#[test]
fn unknown_suite_produces_empty_valid_payload() {
    let payload = simulate("bogus", 2, Some(0.8));
    assert_eq!(payload.summary.total, 0);
    assert!(payload.benchmarks.is_empty());
    assert!(payload.failure_insights.is_empty());
    assert_eq!(payload.recommendations.len(), 2);
    assert_eq!(payload.threshold, Some(0.8));
}

#[test]
fn insights_exist_for_exactly_the_failed_subset() {
    for seed in 0..25 {
        let payload = simulate("all", seed, None);
        let failed_ids: Vec<&str> = payload
            .benchmarks
            .iter()
            .filter(|b| b.status.is_failed())
            .map(|b| b.id.as_str())
            .collect();
        let insight_ids: Vec<&str> = payload
            .failure_insights
            .iter()
            .map(|i| i.benchmark_id.as_str())
            .collect();
        assert_eq!(failed_ids, insight_ids);
    }
}

#[test]
fn most_recent_history_entry_always_passes() {
    for seed in 0..25 {
        let payload = simulate("all", seed, None);
        for benchmark in &payload.benchmarks {
            assert!(benchmark.history[0].result);
        }
    }
}

#[test]
fn persisted_payload_round_trips_through_storage() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let catalog = SuiteCatalog::builtin();

    let payload = simulate("crisis", 9, Some(0.85));
    store.upsert_snapshot("crisis", &payload).unwrap();
    store
        .append_run(&RunRecord::from_payload(
            "crisis",
            &catalog.label("crisis"),
            &payload,
            payload.generated_at,
        ))
        .unwrap();

    let stored = store.get_snapshot("crisis").unwrap().unwrap();
    assert_eq!(stored.suite, "crisis");
    assert_eq!(stored.data.summary.total, payload.summary.total);
    assert_eq!(stored.data.threshold, Some(0.85));
    assert_eq!(
        stored.data.benchmarks[0].success_rate,
        payload.benchmarks[0].success_rate
    );

    let runs = store.list_runs().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].suite_label, "Crisis Command Suite");
    assert_eq!(runs[0].benchmark_count, payload.summary.total);
    assert_eq!(runs[0].success + runs[0].failed, runs[0].benchmark_count);
}

#[tokio::test]
async fn first_access_generates_exactly_one_snapshot_and_record() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(dir.path().to_path_buf(), Some(0.8));

    let first = state.snapshot("output").await.unwrap();
    let second = state.snapshot("output").await.unwrap();

    assert_eq!(first.data.generated_at, second.data.generated_at);
    assert_eq!(state.runs().await.unwrap().len(), 1);
}

#[test]
fn scorer_is_independent_of_the_suite_pipeline() {
    // Stateless: identical breakdowns before and after simulations.
    let before = score_prompt("How should we compare these three caching strategies?");
    let _ = simulate("all", 4, None);
    let after = score_prompt("How should we compare these three caching strategies?");
    assert_eq!(before, after);
    assert!(before.score > 0.0);
}
