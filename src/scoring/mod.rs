//! Heuristic prompt-quality scoring.
//!
//! Scores arbitrary prompt text without any model call: four independent
//! sub-scores (length, structure, clarity, actionability) combined into
//! a single bounded score with human-readable feedback. Deterministic
//! for a fixed input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\-\*]\s|\d+\.").expect("valid regex"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static CAPITALIZED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+").expect("valid regex"));
static EXAMPLE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"example|for instance|such as").expect("valid regex"));

/// Checked as case-insensitive substrings of the whole prompt.
const INTERROGATIVE_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "can", "could", "would", "should",
];

const ACTION_WORDS: &[&str] = &[
    "create",
    "write",
    "explain",
    "describe",
    "analyze",
    "compare",
    "summarize",
    "generate",
    "help",
];

const IMPERATIVE_OPENERS: &[&str] = &["please", "can", "could", "would"];

const EMPTY_PROMPT_FEEDBACK: &str = "Empty prompt - no content to evaluate";
const POSITIVE_FEEDBACK: &str = "Good quality prompt with room for minor improvements";

/// Quality breakdown for one prompt.
///
/// All five scores are bounded to [0, 1]; the combined score is the
/// arithmetic mean of the four sub-scores rounded to 3 decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityScore {
    pub length_score: f64,
    pub structure_score: f64,
    pub clarity_score: f64,
    pub actionability_score: f64,
    pub score: f64,
    pub feedback: String,
}

/// Score a prompt with the heuristic quality analysis.
///
/// Empty or whitespace-only input short-circuits to a zero score with a
/// fixed message; no sub-scores are computed.
pub fn score_prompt(prompt: &str) -> QualityScore {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return QualityScore {
            length_score: 0.0,
            structure_score: 0.0,
            clarity_score: 0.0,
            actionability_score: 0.0,
            score: 0.0,
            feedback: EMPTY_PROMPT_FEEDBACK.to_string(),
        };
    }

    let length_score = length_score(prompt);
    let structure_score = structure_score(prompt);
    let clarity_score = clarity_score(prompt);
    let actionability_score = actionability_score(prompt);

    let score = round3((length_score + structure_score + clarity_score + actionability_score) / 4.0);

    let mut feedback_parts = Vec::new();
    if length_score < 0.5 {
        feedback_parts.push("Consider adding more detail to your prompt");
    }
    if structure_score < 0.5 {
        feedback_parts.push("Try structuring your prompt more clearly");
    }
    if clarity_score < 0.5 {
        feedback_parts.push("Use more specific terms and examples");
    }
    let feedback = if feedback_parts.is_empty() {
        POSITIVE_FEEDBACK.to_string()
    } else {
        feedback_parts.join("; ")
    };

    QualityScore {
        length_score,
        structure_score,
        clarity_score,
        actionability_score,
        score,
        feedback,
    }
}

/// Step function of the word count; optimal range is 10-150 words.
fn length_score(prompt: &str) -> f64 {
    match prompt.split_whitespace().count() {
        0..=4 => 0.2,
        5..=9 => 0.5,
        10..=150 => 1.0,
        151..=250 => 0.7,
        _ => 0.3,
    }
}

fn structure_score(prompt: &str) -> f64 {
    let lower = prompt.to_lowercase();
    let has_question = prompt.contains('?');
    let has_list = LIST_MARKER.is_match(prompt);
    let has_interrogative = INTERROGATIVE_WORDS.iter().any(|word| lower.contains(word));

    let score = 0.4 * weight(has_question) + 0.3 * weight(has_list) + 0.3 * weight(has_interrogative);
    score.min(1.0)
}

fn clarity_score(prompt: &str) -> f64 {
    let lower = prompt.to_lowercase();
    let indicators = [
        DIGIT.is_match(prompt),
        CAPITALIZED_TOKEN.is_match(prompt),
        EXAMPLE_MARKER.is_match(&lower),
        prompt.split_whitespace().count() > 15,
    ];
    indicators.iter().filter(|hit| **hit).count() as f64 / indicators.len() as f64
}

fn actionability_score(prompt: &str) -> f64 {
    let lower = prompt.to_lowercase();
    let has_action = ACTION_WORDS.iter().any(|word| lower.contains(word));

    let first_word = prompt
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let has_imperative = IMPERATIVE_OPENERS.contains(&first_word.as_str())
        || prompt.chars().next().is_some_and(char::is_uppercase);

    (0.6 * weight(has_action) + 0.4 * weight(has_imperative)).min(1.0)
}

fn weight(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
