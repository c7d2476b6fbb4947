//! Adjustments driven by call metadata and pre-computed signals.
//!
//! Band comparators are deliberately mixed strict/non-strict; boundary values
//! (120/300/1200 seconds, -0.5/0/0.3/0.7 sentiment) fall where noted.

use echoguard_core::EscalationRisk;

use super::{category, ScoreAccumulator, ScoringContext};

/// Duration bands, first match wins:
/// `< 120` short, `> 1200` long, `> 300` good; `120..=300` is neutral.
pub fn duration(acc: ScoreAccumulator, ctx: &ScoringContext<'_>) -> ScoreAccumulator {
    let seconds = ctx.call.duration_seconds;
    if seconds < 120 {
        acc.adjust(-10, -5, 0)
            .violation(category::DURATION, "Call too short - likely rushed or incomplete")
            .explain(category::DURATION, "Call duration is below optimal range")
    } else if seconds > 1200 {
        acc.adjust(-8, 0, 0)
            .violation(category::DURATION, "Call too long - inefficient handling")
            .explain(category::DURATION, "Call duration exceeds optimal range")
    } else if seconds > 300 {
        acc.adjust(5, 0, 0)
            .explain(category::DURATION, "Call duration appropriate for call type")
    } else {
        acc
    }
}

/// Sentiment bands, first match wins:
/// `< -0.5`, `< 0`, `> 0.7`, `> 0.3`. Values in `0..=0.3` and NaN leave the
/// scores untouched.
///
/// Scores outside `-1..=1` are not rejected: the comparators apply as-is, so
/// `3.5` lands in the `> 0.7` band and `-4` in the `< -0.5` band.
pub fn sentiment(acc: ScoreAccumulator, ctx: &ScoringContext<'_>) -> ScoreAccumulator {
    let Some(score) = ctx.call.sentiment_score else {
        return acc;
    };

    if score < -0.5 {
        acc.adjust(-15, 0, -10)
            .violation(category::SENTIMENT, "Customer remained very negative throughout call")
            .explain(category::SENTIMENT, "Customer sentiment deteriorated during call")
    } else if score < 0.0 {
        acc.adjust(-8, 0, -5)
            .explain(category::SENTIMENT, "Customer was initially negative")
    } else if score > 0.7 {
        acc.adjust(10, 0, 5)
            .explain(category::SENTIMENT, "Customer very satisfied with resolution")
    } else if score > 0.3 {
        acc.adjust(5, 0, 0)
            .explain(category::SENTIMENT, "Customer sentiment improved during call")
    } else {
        acc
    }
}

/// High risk penalises and flags; medium only penalises; low is neutral.
pub fn escalation_risk(acc: ScoreAccumulator, ctx: &ScoringContext<'_>) -> ScoreAccumulator {
    match ctx.call.escalation_risk {
        Some(EscalationRisk::High) => acc
            .adjust(-12, -8, 0)
            .violation(
                category::ESCALATION_RISK,
                "High escalation risk detected - improper handling",
            )
            .explain(category::ESCALATION_RISK, "Call carried high escalation risk"),
        Some(EscalationRisk::Medium) => acc
            .adjust(-5, 0, 0)
            .explain(category::ESCALATION_RISK, "Call had moderate escalation risk"),
        Some(EscalationRisk::Low) | None => acc,
    }
}
