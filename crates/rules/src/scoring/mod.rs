//! Scoring engine: call characteristics → category scores and SOP violations.
//!
//! Scores start from the profile's baselines and are threaded through an
//! ordered list of adjustments ([`ADJUSTMENTS`]). Each adjustment takes the
//! accumulator by value and returns the next one, optionally recording a
//! violation and/or an explanation. Scores are clamped to `0..=100` once,
//! after the last adjustment.
//!
//! Numeric results do not depend on adjustment order, but explanation text
//! does (last write to a category wins), so the order is fixed.

mod signals;
mod transcript;

use echoguard_core::{CallCharacteristics, EvaluationScore, ExplanationMap, ViolationMap};
use tracing::trace;

use crate::keyword_config::CompiledKeywords;
use crate::profile::EvaluationProfile;
use crate::scoring_config::Baselines;

pub use signals::{duration, escalation_risk, sentiment};
pub use transcript::{transcript_analysis, TRANSCRIPT_CHECKS};

/// Category names used as keys in `sop_violations` and `explanations`.
pub mod category {
    pub const DURATION: &str = "duration";
    pub const SENTIMENT: &str = "sentiment";
    pub const ESCALATION_RISK: &str = "escalation_risk";
    pub const GREETING: &str = "greeting";
    pub const EMPATHY: &str = "empathy";
    pub const SOFT_SKILLS: &str = "soft_skills";
    pub const CLOSING: &str = "closing";
    pub const SECURITY: &str = echoguard_core::SECURITY_CATEGORY;
    pub const RESOLUTION: &str = "resolution";
}

/// Lowest and highest value any final score can take.
pub const SCORE_MIN: i32 = 0;
pub const SCORE_MAX: i32 = 100;

// ── Accumulator ─────────────────────────────────────────────────────

/// Running (unclamped) scores plus the violations and explanations recorded
/// so far.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreAccumulator {
    pub qa: i32,
    pub script_adherence: i32,
    pub resolution_correctness: i32,
    pub violations: ViolationMap,
    pub explanations: ExplanationMap,
}

impl ScoreAccumulator {
    pub fn from_baselines(baselines: &Baselines) -> Self {
        Self {
            qa: baselines.qa,
            script_adherence: baselines.script_adherence,
            resolution_correctness: baselines.resolution_correctness,
            violations: ViolationMap::new(),
            explanations: ExplanationMap::new(),
        }
    }

    /// Add signed deltas to the three running scores.
    pub fn adjust(mut self, qa: i32, script_adherence: i32, resolution_correctness: i32) -> Self {
        self.qa += qa;
        self.script_adherence += script_adherence;
        self.resolution_correctness += resolution_correctness;
        self
    }

    /// Append a violation description under `category`.
    pub fn violation(mut self, category: &str, description: impl Into<String>) -> Self {
        self.violations
            .entry(category.to_string())
            .or_default()
            .push(description.into());
        self
    }

    /// Set the explanation for `category`, replacing any earlier one.
    pub fn explain(mut self, category: &str, text: impl Into<String>) -> Self {
        self.explanations.insert(category.to_string(), text.into());
        self
    }

    /// Clamp the running scores and freeze the result.
    pub fn finish(self) -> EvaluationScore {
        EvaluationScore {
            qa_score: clamp_score(self.qa),
            script_adherence_score: clamp_score(self.script_adherence),
            resolution_correctness_score: clamp_score(self.resolution_correctness),
            sop_violations: self.violations,
            explanations: self.explanations,
        }
    }
}

fn clamp_score(value: i32) -> u32 {
    value.clamp(SCORE_MIN, SCORE_MAX) as u32
}

// ── Adjustments ─────────────────────────────────────────────────────

/// Inputs shared by every adjustment for one call.
#[derive(Debug)]
pub struct ScoringContext<'a> {
    pub call: &'a CallCharacteristics,
    pub keywords: &'a CompiledKeywords,
    /// Lowercased transcript; `None` when absent or empty.
    pub transcript: Option<String>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(call: &'a CallCharacteristics, keywords: &'a CompiledKeywords) -> Self {
        let transcript = call
            .transcript
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        Self {
            call,
            keywords,
            transcript,
        }
    }
}

/// One scoring rule block.
pub type Adjustment = fn(ScoreAccumulator, &ScoringContext<'_>) -> ScoreAccumulator;

/// Rule blocks in application order.
pub const ADJUSTMENTS: &[(&str, Adjustment)] = &[
    ("duration", duration),
    ("sentiment", sentiment),
    ("escalation_risk", escalation_risk),
    ("transcript", transcript_analysis),
];

// ── Engine ──────────────────────────────────────────────────────────

/// Pure, deterministic call scorer.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Score one call against `profile`.
    pub fn evaluate(call: &CallCharacteristics, profile: &EvaluationProfile) -> EvaluationScore {
        let ctx = ScoringContext::new(call, &profile.keywords);
        ADJUSTMENTS
            .iter()
            .fold(
                ScoreAccumulator::from_baselines(&profile.scoring.baselines),
                |acc, (name, adjustment)| {
                    let acc = adjustment(acc, &ctx);
                    trace!(
                        adjustment = %name,
                        qa = acc.qa,
                        script_adherence = acc.script_adherence,
                        resolution_correctness = acc.resolution_correctness,
                        "applied scoring adjustment"
                    );
                    acc
                },
            )
            .finish()
    }
}

/// Score one call with the built-in keyword lists and baselines.
pub fn evaluate_call(call: &CallCharacteristics) -> EvaluationScore {
    ScoringEngine::evaluate(call, EvaluationProfile::builtin())
}
