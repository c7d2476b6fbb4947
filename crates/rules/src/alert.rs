//! Alert decision engine: a priority-ordered decision list.
//!
//! [`ALERT_RULES`] is evaluated top-down and the first rule whose condition
//! holds produces the decision. Several rules can hold at once (a security
//! violation on a low-scoring call matches rules 1, 3 and 4); the earliest
//! one names the cause.

use echoguard_core::{AlertDecision, EscalationRisk, Severity, ViolationMap, SECURITY_CATEGORY};

use crate::profile::EvaluationProfile;
use crate::scoring_config::AlertThresholds;

/// Inputs to the alert rules.
#[derive(Debug, Clone, Copy)]
pub struct AlertInput<'a> {
    pub qa_score: u32,
    pub escalation_risk: Option<EscalationRisk>,
    pub sop_violations: &'a ViolationMap,
}

impl AlertInput<'_> {
    /// Number of violation categories.
    fn violation_count(&self) -> usize {
        self.sop_violations.len()
    }
}

/// One entry of the decision list.
pub struct AlertRule {
    pub name: &'static str,
    pub condition: fn(&AlertInput<'_>, &AlertThresholds) -> bool,
    pub severity: Severity,
    pub reason: &'static str,
}

pub const NO_ALERT_REASON: &str = "No issues detected";

/// Alert rules in evaluation order.
pub const ALERT_RULES: &[AlertRule] = &[
    AlertRule {
        name: "violations_with_low_quality",
        condition: |input, t| input.violation_count() > 0 && input.qa_score < t.low_quality,
        severity: Severity::High,
        reason: "Multiple SOP violations with low quality score",
    },
    AlertRule {
        name: "high_escalation_risk",
        condition: |input, t| {
            input.escalation_risk == Some(EscalationRisk::High)
                && input.qa_score < t.suboptimal_handling
        },
        severity: Severity::High,
        reason: "High escalation risk with suboptimal handling",
    },
    AlertRule {
        name: "security_violation",
        condition: |input, _| input.sop_violations.contains_key(SECURITY_CATEGORY),
        severity: Severity::High,
        reason: "Security/Compliance violation detected",
    },
    AlertRule {
        name: "low_quality",
        condition: |input, t| input.qa_score < t.low_quality,
        severity: Severity::Medium,
        reason: "Quality score below threshold",
    },
    AlertRule {
        name: "minor_violations",
        condition: |input, _| input.violation_count() > 0,
        severity: Severity::Low,
        reason: "Minor SOP violations detected",
    },
];

/// Stateless evaluator over [`ALERT_RULES`].
pub struct AlertEngine;

impl AlertEngine {
    /// The first matching rule, if any.
    pub fn matching_rule(input: &AlertInput<'_>, thresholds: &AlertThresholds) -> Option<&'static AlertRule> {
        ALERT_RULES.iter().find(|rule| (rule.condition)(input, thresholds))
    }

    pub fn decide(input: &AlertInput<'_>, thresholds: &AlertThresholds) -> AlertDecision {
        match Self::matching_rule(input, thresholds) {
            Some(rule) => AlertDecision::alert(rule.severity, rule.reason),
            None => AlertDecision::none(NO_ALERT_REASON),
        }
    }
}

/// Decide whether to alert using the built-in thresholds.
pub fn should_trigger_alert(
    qa_score: u32,
    escalation_risk: Option<EscalationRisk>,
    sop_violations: &ViolationMap,
) -> AlertDecision {
    let input = AlertInput {
        qa_score,
        escalation_risk,
        sop_violations,
    };
    AlertEngine::decide(&input, &EvaluationProfile::builtin().scoring.alert_thresholds)
}
