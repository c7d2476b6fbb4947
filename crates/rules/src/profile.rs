//! Evaluation profile: the compiled configuration every engine runs against.

use std::sync::OnceLock;

use tracing::warn;

use crate::keyword_config::CompiledKeywords;
use crate::schema::{RuleDocument, RuleKind};
use crate::scoring_config::CompiledScoringConfig;

/// Compiled keyword lists plus scoring thresholds.
///
/// `Default` is the built-in configuration and needs no rule files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationProfile {
    pub keywords: CompiledKeywords,
    pub scoring: CompiledScoringConfig,
}

impl EvaluationProfile {
    /// Shared instance of the built-in configuration.
    pub fn builtin() -> &'static EvaluationProfile {
        static BUILTIN: OnceLock<EvaluationProfile> = OnceLock::new();
        BUILTIN.get_or_init(EvaluationProfile::default)
    }

    /// Build a profile from loaded rule documents.
    ///
    /// Disabled documents are ignored. When several enabled documents of one
    /// kind exist, the one with the smallest id wins and a warning is logged.
    /// Kinds with no enabled document keep the built-in defaults.
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a RuleDocument>,
    {
        let mut enabled: Vec<&RuleDocument> = documents
            .into_iter()
            .filter(|doc| doc.metadata().enabled)
            .collect();
        enabled.sort_by(|a, b| a.metadata().id.cmp(&b.metadata().id));

        let keywords = select(&enabled, RuleKind::KeywordConfig)
            .and_then(RuleDocument::as_keyword_config)
            .map(|rule| rule.compile())
            .unwrap_or_default();
        let scoring = select(&enabled, RuleKind::ScoringConfig)
            .and_then(RuleDocument::as_scoring_config)
            .map(|rule| rule.compile())
            .unwrap_or_default();

        Self { keywords, scoring }
    }
}

/// First document of `kind` in id order, warning about any it shadows.
fn select<'a>(sorted: &[&'a RuleDocument], kind: RuleKind) -> Option<&'a RuleDocument> {
    let mut of_kind = sorted.iter().copied().filter(|doc| doc.kind() == kind);
    let chosen = of_kind.next()?;
    let shadowed: Vec<&str> = of_kind.map(|doc| doc.metadata().id.as_str()).collect();
    if !shadowed.is_empty() {
        warn!(
            kind = %kind,
            active = %chosen.metadata().id,
            ignored = ?shadowed,
            "multiple enabled rule documents of one kind; using the first by id"
        );
    }
    Some(chosen)
}
