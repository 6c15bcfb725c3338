//! Failure-insight derivation for failed benchmark results.

use chrono::{DateTime, Utc};

use crate::catalog::BenchmarkTemplate;

use super::payload::{BenchmarkResult, FailureInsight};
use super::round_to;

const FALLBACK_ISSUE: &str = "Observed deviation in latest run.";
const FOLLOW_UP_ISSUE: &str = "Requires operator follow-up.";
const RECOMMENDED_FIX: &str = "Review prompt strategy and re-run targeted objectives.";

/// Derive a failure insight from a simulated result.
///
/// Returns `None` for results classified success; insights exist for
/// exactly the failed subset of a run.
pub fn derive_insight(
    template: &BenchmarkTemplate,
    result: &BenchmarkResult,
    as_of: DateTime<Utc>,
) -> Option<FailureInsight> {
    if !result.status.is_failed() {
        return None;
    }

    let top_issue = if template.failure_reason.is_empty() {
        FALLBACK_ISSUE
    } else {
        template.failure_reason
    };

    Some(FailureInsight {
        id: format!("insight-{}", result.id),
        benchmark_id: result.id.clone(),
        benchmark_name: result.name.clone(),
        failure_rate: round_to(1.0 - result.success_rate, 3),
        last_failure_at: as_of,
        top_issues: vec![top_issue.to_string(), FOLLOW_UP_ISSUE.to_string()],
        recommended_fix: RECOMMENDED_FIX.to_string(),
        failure_category: template.failure_category.to_string(),
        history: result.history.clone(),
    })
}
