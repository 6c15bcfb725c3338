use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a simulated benchmark result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkStatus {
    Success,
    Failed,
}

impl BenchmarkStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, BenchmarkStatus::Failed)
    }
}

/// One entry of a benchmark's synthetic history trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Entry time, sub-seconds truncated
    pub timestamp: DateTime<Utc>,
    /// Objective label ("Check 1".."Check 3")
    pub objective: String,
    /// Whether the objective passed at this point
    pub result: bool,
    /// Fixed evaluation message
    pub message: String,
}

/// Failure metadata attached to a failed benchmark result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestFailure {
    pub objective: String,
    pub reason: String,
    pub category: String,
}

/// One simulated outcome for a template in a given run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    pub id: String,
    pub name: String,
    /// Iteration count copied from the template
    pub iterations: u32,
    /// Achieved success rate, bounded to [0,1]
    pub success_rate: f64,
    pub status: BenchmarkStatus,
    pub updated_at: DateTime<Utc>,
    pub suite: String,
    pub latency_seconds: f64,
    pub tokens_used: u32,
    pub cost_usd: f64,
    /// Reported confidence (successRate * 0.96, clamped)
    pub confidence_reported: f64,
    /// Calibrated confidence (successRate * 0.92, clamped)
    pub confidence_calibrated: f64,
    /// 3-entry trace, most recent first
    pub history: Vec<HistoryEntry>,
    /// Present iff status is failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_failure: Option<LatestFailure>,
}

/// Aggregate counts for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summary {
    pub total: u32,
    pub success: u32,
    pub failed: u32,
}

/// Status of a live-run stub record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LiveRunStatus {
    Completed,
    Queued,
}

/// Fixed-shape live-run stub shown alongside simulated results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRun {
    pub id: String,
    pub benchmark_name: String,
    pub status: LiveRunStatus,
    pub current_iteration: u32,
    pub total_iterations: u32,
    pub started_at: Option<DateTime<Utc>>,
}

/// Structured failure insight derived from a failed benchmark result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureInsight {
    pub id: String,
    pub benchmark_id: String,
    pub benchmark_name: String,
    /// 1 - successRate, rounded to 3 decimals
    pub failure_rate: f64,
    pub last_failure_at: DateTime<Utc>,
    pub top_issues: Vec<String>,
    pub recommended_fix: String,
    pub failure_category: String,
    pub history: Vec<HistoryEntry>,
}

/// Suite-parameterized improvement recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub impact: String,
    pub summary: String,
    pub action: String,
}

/// The unit handed to storage: one full simulated run for a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPayload {
    pub benchmarks: Vec<BenchmarkResult>,
    pub summary: Summary,
    pub live_runs: Vec<LiveRun>,
    pub failure_insights: Vec<FailureInsight>,
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
    /// Caller-supplied pass/fail threshold, echoed for display only
    pub threshold: Option<f64>,
}
