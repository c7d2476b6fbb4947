//! KeywordConfig rule kind: phrase lists used by the transcript checks.
//!
//! `spec.keywords` maps a rule name (`greeting`, `empathy`, `closing`,
//! `security`, `resolution`, `alternative_resolution`) to its phrase list.
//! Matching is case-insensitive substring search, so compilation lowercases
//! every phrase once up front.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::CommonMetadata;

// ── Keyword rules ───────────────────────────────────────────────────

/// A transcript check that is driven by a keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordRule {
    /// Opening protocol phrases.
    Greeting,
    /// Soft-skill phrases; the number of distinct matches is scored.
    Empathy,
    /// Closing protocol phrases.
    Closing,
    /// Sensitive data mentions; every match is reported.
    Security,
    /// Phrases signalling the issue was resolved.
    Resolution,
    /// Fallback resolution phrases (refund, escalation), checked only when
    /// `Resolution` has no match.
    AlternativeResolution,
}

impl KeywordRule {
    pub const ALL: [KeywordRule; 6] = [
        KeywordRule::Greeting,
        KeywordRule::Empathy,
        KeywordRule::Closing,
        KeywordRule::Security,
        KeywordRule::Resolution,
        KeywordRule::AlternativeResolution,
    ];

    /// Name used as the key in `spec.keywords`.
    pub fn name(&self) -> &'static str {
        match self {
            KeywordRule::Greeting => "greeting",
            KeywordRule::Empathy => "empathy",
            KeywordRule::Closing => "closing",
            KeywordRule::Security => "security",
            KeywordRule::Resolution => "resolution",
            KeywordRule::AlternativeResolution => "alternative_resolution",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Built-in phrase list used when no KeywordConfig overrides it.
    pub fn default_keywords(&self) -> &'static [&'static str] {
        match self {
            KeywordRule::Greeting => &["thank you", "how can i help", "my name is"],
            KeywordRule::Empathy => &["sorry", "understand", "appreciate", "thank you"],
            KeywordRule::Closing => &["anything else", "help you with", "have a great"],
            KeywordRule::Security => &["password", "ssn", "social security", "credit card"],
            KeywordRule::Resolution => &["solved", "fixed", "resolved", "working now", "all set"],
            KeywordRule::AlternativeResolution => &["refund", "escalate"],
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level KeywordConfig rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeywordConfigRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: KeywordConfigSpec,
}

/// The `spec` section of a KeywordConfig rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeywordConfigSpec {
    /// Rule name → phrase list. Rules left out keep their built-in list.
    pub keywords: IndexMap<String, Vec<String>>,
}

// ── Compiled (hot-path) types ───────────────────────────────────────

/// Lowercased phrase lists for every [`KeywordRule`], ready for matching
/// against a lowercased transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledKeywords {
    sets: [Vec<String>; 6],
}

impl Default for CompiledKeywords {
    fn default() -> Self {
        Self {
            sets: KeywordRule::ALL.map(|rule| {
                rule.default_keywords()
                    .iter()
                    .map(|k| k.to_string())
                    .collect()
            }),
        }
    }
}

impl CompiledKeywords {
    /// Replace one rule's phrase list. Phrases are lowercased; blank ones dropped.
    pub fn with_rule<I, S>(mut self, rule: KeywordRule, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sets[rule.index()] = keywords
            .into_iter()
            .filter(|k| !k.as_ref().trim().is_empty())
            .map(|k| k.as_ref().to_lowercase())
            .collect();
        self
    }

    pub fn get(&self, rule: KeywordRule) -> &[String] {
        &self.sets[rule.index()]
    }

    /// Phrases of `rule` found in `transcript`, in list order.
    ///
    /// `transcript` must already be lowercased.
    pub fn matches<'a>(&'a self, rule: KeywordRule, transcript: &str) -> Vec<&'a str> {
        self.get(rule)
            .iter()
            .filter(|k| transcript.contains(k.as_str()))
            .map(|k| k.as_str())
            .collect()
    }

    /// Whether any phrase of `rule` occurs in the (lowercased) `transcript`.
    pub fn any_match(&self, rule: KeywordRule, transcript: &str) -> bool {
        self.get(rule).iter().any(|k| transcript.contains(k.as_str()))
    }
}

impl KeywordConfigRule {
    /// Compile the YAML config. Unknown rule names are ignored (validation
    /// reports them); missing ones keep the built-in list.
    pub fn compile(&self) -> CompiledKeywords {
        self.spec
            .keywords
            .iter()
            .filter_map(|(name, list)| KeywordRule::from_name(name).map(|rule| (rule, list)))
            .fold(CompiledKeywords::default(), |compiled, (rule, list)| {
                compiled.with_rule(rule, list)
            })
    }
}
