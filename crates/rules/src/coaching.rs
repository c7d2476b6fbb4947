//! Coaching insight generator: evaluation → agent-facing guidance.
//!
//! Insights come out in generation order (script adherence, resolution,
//! one per violation entry, then the QA praise). Callers that want them
//! ranked use [`echoguard_core::sort_by_priority`].

use echoguard_core::{CoachingInsight, EvaluationScore, Priority, SECURITY_CATEGORY};

use crate::profile::EvaluationProfile;
use crate::scoring_config::CoachingThresholds;

pub struct CoachingGenerator;

impl CoachingGenerator {
    pub fn generate(
        evaluation: &EvaluationScore,
        qa_score: u32,
        thresholds: &CoachingThresholds,
    ) -> Vec<CoachingInsight> {
        let mut insights = Vec::new();

        let script = evaluation.script_adherence_score;
        if script < thresholds.script_adherence_low {
            insights.push(CoachingInsight::new(
                format!(
                    "Your script adherence score was {script}/100. Focus on following the \
                     greeting and closing protocols more consistently."
                ),
                Priority::Medium,
            ));
        } else if script > thresholds.script_adherence_high {
            insights.push(CoachingInsight::new(
                "Excellent script adherence! You're consistently following procedures. Keep it up!",
                Priority::Low,
            ));
        }

        let resolution = evaluation.resolution_correctness_score;
        if resolution < thresholds.resolution_low {
            insights.push(CoachingInsight::new(
                format!(
                    "Your resolution score was {resolution}/100. Try to ensure customers feel \
                     their issues are fully resolved before ending the call."
                ),
                Priority::High,
            ));
        }

        for (category, violations) in &evaluation.sop_violations {
            let priority = if category == SECURITY_CATEGORY {
                Priority::High
            } else {
                Priority::Medium
            };
            insights.extend(violations.iter().map(|violation| {
                CoachingInsight::new(
                    format!("[{category}] {violation}. Review the SOP for this area."),
                    priority,
                )
            }));
        }

        if qa_score > thresholds.mentoring {
            insights.push(CoachingInsight::new(
                "Great performance! Your quality score exceeds expectations. \
                 Consider mentoring newer team members.",
                Priority::Low,
            ));
        }

        insights
    }
}

/// Generate insights using the built-in thresholds.
pub fn generate_coaching_insights(evaluation: &EvaluationScore, qa_score: u32) -> Vec<CoachingInsight> {
    CoachingGenerator::generate(
        evaluation,
        qa_score,
        &EvaluationProfile::builtin().scoring.coaching_thresholds,
    )
}
