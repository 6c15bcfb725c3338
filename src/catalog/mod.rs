//! Static registry of benchmark suites and their templates.
//!
//! Templates are pure data: they carry the baselines the simulator
//! perturbs and the failure metadata attached to failed results.

/// Static configuration for one benchmark scenario.
#[derive(Debug, Clone)]
pub struct BenchmarkTemplate {
    /// Stable identifier, reused as the benchmark result id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Suite this template belongs to
    pub suite: &'static str,
    /// Target iteration count
    pub iterations: u32,
    /// Baseline success probability (0-1)
    pub base_success: f64,
    /// Baseline latency in seconds
    pub latency_seconds: f64,
    /// Baseline cost in USD
    pub cost_usd: f64,
    /// Objective reported when the benchmark fails
    pub failure_objective: &'static str,
    /// Reason text reported when the benchmark fails
    pub failure_reason: &'static str,
    /// Failure category tag carried onto insights
    pub failure_category: &'static str,
}

/// Registry mapping suite ids to their ordered templates.
#[derive(Debug, Clone)]
pub struct SuiteCatalog {
    output: Vec<BenchmarkTemplate>,
    custom: Vec<BenchmarkTemplate>,
    crisis: Vec<BenchmarkTemplate>,
}

impl SuiteCatalog {
    /// The built-in suite registry.
    pub fn builtin() -> Self {
        Self {
            output: vec![
                BenchmarkTemplate {
                    id: "calc-string-check",
                    name: "Addition String Check",
                    suite: "output",
                    iterations: 5,
                    base_success: 0.93,
                    latency_seconds: 0.42,
                    cost_usd: 0.00015,
                    failure_objective: "Addition accurate",
                    failure_reason: "Mismatch between expected string and response.",
                    failure_category: "quality",
                },
                BenchmarkTemplate {
                    id: "calc-regex-match",
                    name: "Multiplication Regex",
                    suite: "output",
                    iterations: 4,
                    base_success: 0.88,
                    latency_seconds: 0.38,
                    cost_usd: 0.00012,
                    failure_objective: "Regex captures product",
                    failure_reason: "Output failed to match the expected multiplication pattern.",
                    failure_category: "quality",
                },
                BenchmarkTemplate {
                    id: "calc-objective-run",
                    name: "Combined Objective Run",
                    suite: "output",
                    iterations: 3,
                    base_success: 0.81,
                    latency_seconds: 0.55,
                    cost_usd: 0.0002,
                    failure_objective: "All calculator objectives pass",
                    failure_reason: "One or more scenarios returned incorrect arithmetic.",
                    failure_category: "quality",
                },
            ],
            custom: vec![
                BenchmarkTemplate {
                    id: "custom-weather",
                    name: "Weather Agent Scenario",
                    suite: "custom",
                    iterations: 6,
                    base_success: 0.79,
                    latency_seconds: 0.72,
                    cost_usd: 0.00032,
                    failure_objective: "Weather summary accuracy",
                    failure_reason: "Temperature range omitted or mismatched city.",
                    failure_category: "quality",
                },
                BenchmarkTemplate {
                    id: "custom-translate",
                    name: "Translation Agent Accuracy",
                    suite: "custom",
                    iterations: 5,
                    base_success: 0.84,
                    latency_seconds: 0.63,
                    cost_usd: 0.00029,
                    failure_objective: "EN→ES translation fidelity",
                    failure_reason: "Idiomatic phrase translated too literally.",
                    failure_category: "quality",
                },
                BenchmarkTemplate {
                    id: "custom-fallbacks",
                    name: "Fallback Strategy Guardrails",
                    suite: "custom",
                    iterations: 4,
                    base_success: 0.75,
                    latency_seconds: 0.81,
                    cost_usd: 0.00033,
                    failure_objective: "Escalation to human",
                    failure_reason: "Agent failed to surface escalation guidance after tool failure.",
                    failure_category: "quality",
                },
            ],
            crisis: vec![
                BenchmarkTemplate {
                    id: "crisis-inventory",
                    name: "Inventory Fulfillment",
                    suite: "crisis",
                    iterations: 7,
                    base_success: 0.77,
                    latency_seconds: 0.94,
                    cost_usd: 0.00041,
                    failure_objective: "Backorder mitigation",
                    failure_reason: "Critical SKUs not prioritized during shortage.",
                    failure_category: "quality",
                },
                BenchmarkTemplate {
                    id: "crisis-routing",
                    name: "Crisis Routing Plan",
                    suite: "crisis",
                    iterations: 6,
                    base_success: 0.7,
                    latency_seconds: 1.02,
                    cost_usd: 0.00037,
                    failure_objective: "Delivery routing",
                    failure_reason: "Suboptimal route increased ETA beyond policy.",
                    failure_category: "quality",
                },
                BenchmarkTemplate {
                    id: "crisis-communication",
                    name: "Stakeholder Comms",
                    suite: "crisis",
                    iterations: 5,
                    base_success: 0.83,
                    latency_seconds: 0.88,
                    cost_usd: 0.00035,
                    failure_objective: "Escalation cadence",
                    failure_reason: "Status updates missed 30-min SLA window.",
                    failure_category: "quality",
                },
            ],
        }
    }

    /// Resolve a suite id to its ordered templates.
    ///
    /// `"all"` concatenates every suite in a fixed order (output, custom,
    /// crisis). Unknown ids resolve to an empty set, never an error.
    pub fn templates_for(&self, suite: &str) -> Vec<&BenchmarkTemplate> {
        match suite {
            "all" => self
                .output
                .iter()
                .chain(self.custom.iter())
                .chain(self.crisis.iter())
                .collect(),
            "output" => self.output.iter().collect(),
            "custom" => self.custom.iter().collect(),
            "crisis" => self.crisis.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Display label for a suite id; unknown ids fall back to the id.
    pub fn label(&self, suite: &str) -> String {
        match suite {
            "output" => "Calculator Demo Suite".to_string(),
            "custom" => "Custom Agents Suite".to_string(),
            "crisis" => "Crisis Command Suite".to_string(),
            "all" => "Run Everything".to_string(),
            other => other.to_string(),
        }
    }

    /// Suite ids with their own template lists, in catalog order.
    pub fn suite_ids(&self) -> Vec<&'static str> {
        vec!["output", "custom", "crisis"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_suites_resolve() {
        let catalog = SuiteCatalog::builtin();
        assert_eq!(catalog.templates_for("output").len(), 3);
        assert_eq!(catalog.templates_for("custom").len(), 3);
        assert_eq!(catalog.templates_for("crisis").len(), 3);
    }

    #[test]
    fn test_all_concatenates_in_fixed_order() {
        let catalog = SuiteCatalog::builtin();
        let all = catalog.templates_for("all");
        assert_eq!(all.len(), 9);
        assert_eq!(all[0].suite, "output");
        assert_eq!(all[3].suite, "custom");
        assert_eq!(all[6].suite, "crisis");
    }

    #[test]
    fn test_unknown_suite_is_empty_not_error() {
        let catalog = SuiteCatalog::builtin();
        assert!(catalog.templates_for("bogus").is_empty());
        assert_eq!(catalog.label("bogus"), "bogus");
    }

    #[test]
    fn test_baselines_are_probabilities() {
        let catalog = SuiteCatalog::builtin();
        for template in catalog.templates_for("all") {
            assert!((0.0..=1.0).contains(&template.base_success));
            assert!(template.latency_seconds > 0.0);
            assert!(template.cost_usd > 0.0);
        }
    }
}
