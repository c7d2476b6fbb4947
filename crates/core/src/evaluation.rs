//! Evaluation output of the scoring engine.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Violation category name → ordered violation descriptions.
///
/// Iteration follows insertion order (the order rules fired); equality does not.
pub type ViolationMap = IndexMap<String, Vec<String>>;

/// Signal category name → one rationale string.
pub type ExplanationMap = IndexMap<String, String>;

/// Violation category raised by the security/compliance transcript check.
pub const SECURITY_CATEGORY: &str = "security";

/// Scores, violation flags and rationale for one interaction.
///
/// The three scores are always within `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationScore {
    pub qa_score: u32,
    pub script_adherence_score: u32,
    pub resolution_correctness_score: u32,
    pub sop_violations: ViolationMap,
    pub explanations: ExplanationMap,
}

impl EvaluationScore {
    /// Number of distinct violation categories (not individual descriptions).
    pub fn violation_count(&self) -> usize {
        self.sop_violations.len()
    }

    pub fn has_violation(&self, category: &str) -> bool {
        self.sop_violations.contains_key(category)
    }
}

/// Coarse quality band for a 0-100 score, as shown next to scores in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    NeedsImprovement,
    Fair,
    Good,
    Excellent,
}

impl ScoreBand {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
