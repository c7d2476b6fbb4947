//! ScoringConfig rule kind: score baselines, alert thresholds, coaching
//! thresholds, and score band boundaries.
//!
//! Every section is optional; omitted values fall back to the built-in
//! defaults, so an empty `spec: {}` reproduces the stock behaviour.

use echoguard_core::ScoreBand;
use serde::{Deserialize, Serialize};

use crate::schema::CommonMetadata;

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level ScoringConfig rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfigRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: ScoringConfigSpec,
}

/// The `spec` section of a ScoringConfig rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ScoringConfigSpec {
    /// Starting values for the three running scores.
    pub baselines: Baselines,
    /// Score thresholds used by the alert decision rules.
    pub alert_thresholds: AlertThresholds,
    /// Score thresholds used by the coaching insight generator.
    pub coaching_thresholds: CoachingThresholds,
    /// Lower bounds of the Fair/Good/Excellent score bands.
    pub score_bands: ScoreBandThresholds,
}

/// Starting values before any adjustment is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Baselines {
    pub qa: i32,
    pub script_adherence: i32,
    pub resolution_correctness: i32,
}

impl Default for Baselines {
    fn default() -> Self {
        Self {
            qa: 70,
            script_adherence: 75,
            resolution_correctness: 70,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct AlertThresholds {
    /// QA scores strictly below this are "low quality".
    pub low_quality: u32,
    /// QA scores strictly below this count as suboptimal handling of a
    /// high-escalation-risk call.
    pub suboptimal_handling: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            low_quality: 60,
            suboptimal_handling: 70,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct CoachingThresholds {
    /// Script adherence strictly below this gets an improvement insight.
    pub script_adherence_low: u32,
    /// Script adherence strictly above this gets a positive insight.
    pub script_adherence_high: u32,
    /// Resolution correctness strictly below this gets a high-priority insight.
    pub resolution_low: u32,
    /// QA scores strictly above this get the mentoring suggestion.
    pub mentoring: u32,
}

impl Default for CoachingThresholds {
    fn default() -> Self {
        Self {
            script_adherence_low: 70,
            script_adherence_high: 85,
            resolution_low: 70,
            mentoring: 85,
        }
    }
}

/// Inclusive lower bounds: `score >= excellent` is Excellent, and so on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ScoreBandThresholds {
    pub excellent: u32,
    pub good: u32,
    pub fair: u32,
}

impl Default for ScoreBandThresholds {
    fn default() -> Self {
        Self {
            excellent: 90,
            good: 75,
            fair: 60,
        }
    }
}

impl ScoreBandThresholds {
    pub fn classify(&self, score: u32) -> ScoreBand {
        if score >= self.excellent {
            ScoreBand::Excellent
        } else if score >= self.good {
            ScoreBand::Good
        } else if score >= self.fair {
            ScoreBand::Fair
        } else {
            ScoreBand::NeedsImprovement
        }
    }
}

// ── Compiled (hot-path) types ───────────────────────────────────────

/// Scoring config as the engines consume it. The YAML spec is already fully
/// typed, so compiling is a copy.
pub type CompiledScoringConfig = ScoringConfigSpec;

impl ScoringConfigRule {
    /// Compile the YAML config into its engine form.
    pub fn compile(&self) -> CompiledScoringConfig {
        self.spec.clone()
    }
}
