//! Suite-template-driven payload simulator.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;

use crate::catalog::{BenchmarkTemplate, SuiteCatalog};

use super::insight::derive_insight;
use super::payload::{BenchmarkResult, BenchmarkStatus, HistoryEntry, LatestFailure, RunPayload};
use super::rollup::aggregate;
use super::{bounded, round_to};

/// Fixed classification threshold. The caller-supplied threshold is
/// recorded on the payload for display but never alters classification.
const PASS_THRESHOLD: f64 = 0.8;

/// Fixed message attached to every synthetic history entry.
const HISTORY_MESSAGE: &str = "Objective evaluated via simulated snapshot.";

/// Produces one benchmark result per template of a suite, plus a
/// 3-point history trace per benchmark.
///
/// Stateless across calls: randomness and the as-of instant are injected
/// so runs are reproducible under a seeded generator.
pub struct SuiteSimulator<'a> {
    catalog: &'a SuiteCatalog,
}

impl<'a> SuiteSimulator<'a> {
    pub fn new(catalog: &'a SuiteCatalog) -> Self {
        Self { catalog }
    }

    /// Simulate one run of `suite`.
    ///
    /// Unknown suite ids yield an empty, valid payload with zero counts.
    /// All timestamps in the payload derive from the single `as_of`
    /// instant.
    pub fn simulate<R: Rng>(
        &self,
        suite: &str,
        threshold: Option<f64>,
        rng: &mut R,
        as_of: DateTime<Utc>,
    ) -> RunPayload {
        let mut benchmarks = Vec::new();
        let mut failure_insights = Vec::new();

        for template in self.catalog.templates_for(suite) {
            let result = simulate_template(template, rng, as_of);
            if let Some(insight) = derive_insight(template, &result, as_of) {
                failure_insights.push(insight);
            }
            benchmarks.push(result);
        }

        let rollup = aggregate(suite, &benchmarks, as_of);

        RunPayload {
            benchmarks,
            summary: rollup.summary,
            live_runs: rollup.live_runs,
            failure_insights,
            recommendations: rollup.recommendations,
            generated_at: as_of,
            threshold,
        }
    }
}

/// Perturb one template into a benchmark result.
fn simulate_template<R: Rng>(
    template: &BenchmarkTemplate,
    rng: &mut R,
    as_of: DateTime<Utc>,
) -> BenchmarkResult {
    let success_rate = bounded(template.base_success + rng.gen_range(-0.08..0.08));
    let status = if success_rate >= PASS_THRESHOLD {
        BenchmarkStatus::Success
    } else {
        BenchmarkStatus::Failed
    };

    let latency = (template.latency_seconds + rng.gen_range(-0.20..0.25)).max(0.08);
    let cost = (template.cost_usd + rng.gen_range(-0.0002..0.0002)).max(0.0);
    let tokens = (600.0 + rng.gen_range(-80.0..120.0)) as u32;

    let latest_failure = status.is_failed().then(|| LatestFailure {
        objective: template.failure_objective.to_string(),
        reason: template.failure_reason.to_string(),
        category: template.failure_category.to_string(),
    });

    BenchmarkResult {
        id: template.id.to_string(),
        name: template.name.to_string(),
        iterations: template.iterations,
        success_rate: round_to(success_rate, 3),
        status,
        updated_at: as_of,
        suite: template.suite.to_string(),
        latency_seconds: round_to(latency, 3),
        tokens_used: tokens,
        cost_usd: round_to(cost, 5),
        confidence_reported: round_to(bounded(success_rate * 0.96), 3),
        confidence_calibrated: round_to(bounded(success_rate * 0.92), 3),
        history: history_slice(success_rate, as_of),
        latest_failure,
    }
}

/// Build the 3-entry trace, most recent first, spaced 5 minutes apart.
///
/// The step-0 entry is always marked passing regardless of the success
/// rate; older entries reflect the rate.
fn history_slice(success_rate: f64, as_of: DateTime<Utc>) -> Vec<HistoryEntry> {
    (0..3)
        .map(|step| HistoryEntry {
            timestamp: (as_of - Duration::minutes(step * 5)).trunc_subsecs(0),
            objective: format!("Check {}", step + 1),
            result: success_rate > 0.5 || step < 1,
            message: HISTORY_MESSAGE.to_string(),
        })
        .collect()
}
