//! Transcript checks: case-insensitive phrase matching against the
//! profile's keyword lists.
//!
//! All five checks run independently, in [`TRANSCRIPT_CHECKS`] order.

use crate::keyword_config::{CompiledKeywords, KeywordRule};

use super::{category, ScoreAccumulator, ScoringContext};

/// A single transcript check over the lowercased transcript.
pub type TranscriptCheck = fn(ScoreAccumulator, &str, &CompiledKeywords) -> ScoreAccumulator;

pub const TRANSCRIPT_CHECKS: &[(&str, TranscriptCheck)] = &[
    ("greeting", greeting),
    ("empathy", empathy),
    ("closing", closing),
    ("security", security),
    ("resolution", resolution),
];

/// Run every transcript check; a no-op when the call has no transcript.
pub fn transcript_analysis(acc: ScoreAccumulator, ctx: &ScoringContext<'_>) -> ScoreAccumulator {
    match ctx.transcript.as_deref() {
        Some(transcript) => TRANSCRIPT_CHECKS
            .iter()
            .fold(acc, |acc, (_, check)| check(acc, transcript, ctx.keywords)),
        None => acc,
    }
}

fn greeting(acc: ScoreAccumulator, transcript: &str, keywords: &CompiledKeywords) -> ScoreAccumulator {
    if keywords.any_match(KeywordRule::Greeting, transcript) {
        acc.adjust(0, 10, 0)
            .explain(category::GREETING, "Agent used proper greeting protocol")
    } else {
        acc.adjust(0, -8, 0)
            .violation(category::GREETING, "Agent greeting did not follow protocol")
            .explain(category::GREETING, "Greeting protocol not followed")
    }
}

/// Scored by the number of distinct empathy phrases present.
fn empathy(acc: ScoreAccumulator, transcript: &str, keywords: &CompiledKeywords) -> ScoreAccumulator {
    match keywords.matches(KeywordRule::Empathy, transcript).len() {
        0 => acc
            .adjust(-5, 0, 0)
            .violation(category::SOFT_SKILLS, "Insufficient empathy displayed")
            .explain(category::EMPATHY, "Minimal empathy shown in call"),
        1 => acc
            .adjust(4, 0, 0)
            .explain(category::EMPATHY, "Some empathy shown"),
        _ => acc
            .adjust(8, 0, 0)
            .explain(category::EMPATHY, "Good display of empathy and soft skills"),
    }
}

fn closing(acc: ScoreAccumulator, transcript: &str, keywords: &CompiledKeywords) -> ScoreAccumulator {
    if keywords.any_match(KeywordRule::Closing, transcript) {
        acc.adjust(0, 8, 0)
            .explain(category::CLOSING, "Agent used proper call closing protocol")
    } else {
        acc.adjust(0, -5, 0)
            .violation(category::CLOSING, "Call closing did not follow protocol")
            .explain(category::CLOSING, "Closing protocol not followed")
    }
}

/// Every matched sensitive phrase is listed in a single violation entry.
fn security(acc: ScoreAccumulator, transcript: &str, keywords: &CompiledKeywords) -> ScoreAccumulator {
    let found = keywords.matches(KeywordRule::Security, transcript);
    if found.is_empty() {
        return acc;
    }
    acc.adjust(-20, -15, 0)
        .violation(
            category::SECURITY,
            format!("Potential security violation: {}", found.join(", ")),
        )
        .explain(category::SECURITY, "Security/Compliance issue detected")
}

/// Explicit resolution phrases beat the refund/escalation fallback.
fn resolution(acc: ScoreAccumulator, transcript: &str, keywords: &CompiledKeywords) -> ScoreAccumulator {
    if keywords.any_match(KeywordRule::Resolution, transcript) {
        acc.adjust(0, 0, 10)
            .explain(category::RESOLUTION, "Clear indication of problem resolution")
    } else if keywords.any_match(KeywordRule::AlternativeResolution, transcript) {
        acc.adjust(0, 0, 5)
            .explain(category::RESOLUTION, "Alternative resolution provided")
    } else {
        acc
    }
}
