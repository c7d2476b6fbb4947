//! Validation for the KeywordConfig and ScoringConfig rule kinds.

use std::collections::HashSet;

use super::fuzzy::{fuzzy_match, is_kebab_case};
use super::ValidationResult;

use crate::keyword_config::{KeywordConfigRule, KeywordRule};
use crate::scoring::{SCORE_MAX, SCORE_MIN};
use crate::scoring_config::ScoringConfigRule;

// ── Common metadata validation ──────────────────────────────────────

fn validate_common_metadata(
    api_version: &str,
    kind: &str,
    expected_kind: &str,
    id: &str,
    result: &mut ValidationResult,
) {
    if api_version != "v1" {
        result.error(
            "apiVersion",
            format!("apiVersion must be 'v1', got '{}'", api_version),
        );
    }
    if kind != expected_kind {
        result.error(
            "kind",
            format!("kind must be '{}', got '{}'", expected_kind, kind),
        );
    }
    if !is_kebab_case(id) {
        result.error(
            "metadata.id",
            format!(
                "id must be kebab-case (lowercase alphanumeric + hyphens), got '{}'",
                id
            ),
        );
    }
}

// ── KeywordConfig validation ────────────────────────────────────────

pub fn validate_keyword_config(rule: &KeywordConfigRule, result: &mut ValidationResult) {
    validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        "KeywordConfig",
        &rule.metadata.id,
        result,
    );

    let known: Vec<&str> = KeywordRule::ALL.iter().map(|r| r.name()).collect();

    for (name, keywords) in &rule.spec.keywords {
        let path = format!("spec.keywords.{}", name);

        if KeywordRule::from_name(name).is_none() {
            result.error_with_suggestion(
                &path,
                format!("unknown keyword rule '{}'", name),
                fuzzy_match(name, &known).map(str::to_string),
            );
            continue;
        }

        if keywords.is_empty() {
            result.error(&path, "keyword list must not be empty");
            continue;
        }

        let mut seen = HashSet::new();
        for (i, keyword) in keywords.iter().enumerate() {
            let item = format!("{}[{}]", path, i);
            if keyword.trim().is_empty() {
                result.error(&item, "keyword must not be blank");
                continue;
            }
            if keyword.to_lowercase() != *keyword {
                result.warn(
                    &item,
                    format!("keyword '{}' is matched case-insensitively; write it in lowercase", keyword),
                );
            }
            if !seen.insert(keyword.to_lowercase()) {
                result.warn(&item, format!("duplicate keyword '{}'", keyword));
            }
        }
    }

    for rule_name in &known {
        if !rule.spec.keywords.contains_key(*rule_name) {
            result.warn(
                "spec.keywords",
                format!("'{}' not configured; the built-in list is used", rule_name),
            );
        }
    }
}

// ── ScoringConfig validation ────────────────────────────────────────

pub fn validate_scoring_config(rule: &ScoringConfigRule, result: &mut ValidationResult) {
    validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        "ScoringConfig",
        &rule.metadata.id,
        result,
    );

    let spec = &rule.spec;

    let baselines = [
        ("qa", spec.baselines.qa),
        ("script_adherence", spec.baselines.script_adherence),
        ("resolution_correctness", spec.baselines.resolution_correctness),
    ];
    for (name, value) in baselines {
        if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            result.error(
                format!("spec.baselines.{}", name),
                format!("baseline must be within {}..={}, got {}", SCORE_MIN, SCORE_MAX, value),
            );
        }
    }

    let alerts = &spec.alert_thresholds;
    if alerts.low_quality > alerts.suboptimal_handling {
        result.warn(
            "spec.alert_thresholds",
            format!(
                "low_quality ({}) is above suboptimal_handling ({})",
                alerts.low_quality, alerts.suboptimal_handling
            ),
        );
    }

    let coaching = &spec.coaching_thresholds;
    if coaching.script_adherence_low > coaching.script_adherence_high {
        result.error(
            "spec.coaching_thresholds",
            format!(
                "script_adherence_low ({}) must not exceed script_adherence_high ({})",
                coaching.script_adherence_low, coaching.script_adherence_high
            ),
        );
    }

    let bands = &spec.score_bands;
    if !(bands.fair <= bands.good && bands.good <= bands.excellent && bands.excellent <= SCORE_MAX as u32) {
        result.error(
            "spec.score_bands",
            format!(
                "bands must satisfy fair <= good <= excellent <= {}, got {}/{}/{}",
                SCORE_MAX, bands.fair, bands.good, bands.excellent
            ),
        );
    }
}
