//! Multi-kind rule document container and accessors.

use super::{CommonMetadata, RuleKind};
use crate::keyword_config::KeywordConfigRule;
use crate::scoring_config::ScoringConfigRule;

/// A fully deserialized rule of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDocument {
    /// Keyword config: transcript phrase lists per scoring rule.
    KeywordConfig(KeywordConfigRule),
    /// Scoring config: baselines, alert/coaching thresholds, score bands.
    ScoringConfig(ScoringConfigRule),
}

impl RuleDocument {
    /// Get the rule's metadata regardless of kind.
    pub fn metadata(&self) -> &CommonMetadata {
        match self {
            RuleDocument::KeywordConfig(rule) => &rule.metadata,
            RuleDocument::ScoringConfig(rule) => &rule.metadata,
        }
    }

    /// Get mutable reference to the rule's metadata regardless of kind.
    pub fn metadata_mut(&mut self) -> &mut CommonMetadata {
        match self {
            RuleDocument::KeywordConfig(rule) => &mut rule.metadata,
            RuleDocument::ScoringConfig(rule) => &mut rule.metadata,
        }
    }

    /// Get the rule kind.
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleDocument::KeywordConfig(_) => RuleKind::KeywordConfig,
            RuleDocument::ScoringConfig(_) => RuleKind::ScoringConfig,
        }
    }

    pub fn as_keyword_config(&self) -> Option<&KeywordConfigRule> {
        match self {
            RuleDocument::KeywordConfig(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_scoring_config(&self) -> Option<&ScoringConfigRule> {
        match self {
            RuleDocument::ScoringConfig(rule) => Some(rule),
            _ => None,
        }
    }

    /// Serialize this document to JSON, delegating to the inner type.
    ///
    /// Each inner type already has `apiVersion`, `kind`, and `metadata` fields,
    /// so the JSON output naturally identifies the rule kind.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            RuleDocument::KeywordConfig(r) => serde_json::to_value(r),
            RuleDocument::ScoringConfig(r) => serde_json::to_value(r),
        }
    }

    /// Serialize this document to YAML, delegating to the inner type.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        match self {
            RuleDocument::KeywordConfig(r) => serde_yaml::to_string(r),
            RuleDocument::ScoringConfig(r) => serde_yaml::to_string(r),
        }
    }
}
