//! Evaluation pipeline: score a call, then fan the score out to the alert
//! engine and the coaching generator.

use echoguard_core::{
    AlertDecision, CallCharacteristics, CoachingInsight, EscalationRisk, EvaluationScore,
    ScoreBand, ViolationMap,
};
use serde::Serialize;
use tracing::debug;

use crate::alert::{AlertEngine, AlertInput};
use crate::coaching::CoachingGenerator;
use crate::profile::EvaluationProfile;
use crate::scoring::ScoringEngine;

/// Everything produced for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionReport {
    pub evaluation: EvaluationScore,
    pub score_band: ScoreBand,
    pub alert: AlertDecision,
    pub coaching_insights: Vec<CoachingInsight>,
}

/// Runs the three engines against one [`EvaluationProfile`].
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    profile: EvaluationProfile,
}

impl Evaluator {
    pub fn new(profile: EvaluationProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &EvaluationProfile {
        &self.profile
    }

    pub fn evaluate_call(&self, call: &CallCharacteristics) -> EvaluationScore {
        ScoringEngine::evaluate(call, &self.profile)
    }

    pub fn should_trigger_alert(
        &self,
        qa_score: u32,
        escalation_risk: Option<EscalationRisk>,
        sop_violations: &ViolationMap,
    ) -> AlertDecision {
        let input = AlertInput {
            qa_score,
            escalation_risk,
            sop_violations,
        };
        AlertEngine::decide(&input, &self.profile.scoring.alert_thresholds)
    }

    pub fn generate_coaching_insights(
        &self,
        evaluation: &EvaluationScore,
        qa_score: u32,
    ) -> Vec<CoachingInsight> {
        CoachingGenerator::generate(evaluation, qa_score, &self.profile.scoring.coaching_thresholds)
    }

    pub fn score_band(&self, score: u32) -> ScoreBand {
        self.profile.scoring.score_bands.classify(score)
    }

    /// Score `call` and derive its alert decision, coaching and band.
    pub fn evaluate_interaction(&self, call: &CallCharacteristics) -> InteractionReport {
        let evaluation = self.evaluate_call(call);
        let alert = self.should_trigger_alert(
            evaluation.qa_score,
            call.escalation_risk,
            &evaluation.sop_violations,
        );
        let coaching_insights = self.generate_coaching_insights(&evaluation, evaluation.qa_score);
        let score_band = self.score_band(evaluation.qa_score);

        debug!(
            qa_score = evaluation.qa_score,
            script_adherence_score = evaluation.script_adherence_score,
            resolution_correctness_score = evaluation.resolution_correctness_score,
            violations = evaluation.violation_count(),
            should_alert = alert.should_alert,
            severity = %alert.severity,
            insights = coaching_insights.len(),
            "evaluated interaction"
        );

        InteractionReport {
            evaluation,
            score_band,
            alert,
            coaching_insights,
        }
    }
}
