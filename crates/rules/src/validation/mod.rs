//! Rule document validation with structured errors and suggestions.
//!
//! Returns a [`ValidationResult`] with errors (block load) and warnings
//! (advisory). The loader rejects documents with errors and logs warnings.

mod config_checks;

pub mod fuzzy;

use serde::{Deserialize, Serialize};

use crate::schema::{RuleDocument, RuleEnvelope, RuleKind};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted location, e.g. `"spec.keywords.greeting"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion,
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line, suggestions included.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| {
                let location = if e.path.is_empty() { "document" } else { e.path.as_str() };
                match &e.suggestion {
                    Some(s) => format!("{location}: {} (did you mean '{s}'?)", e.message),
                    None => format!("{location}: {}", e.message),
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate any [`RuleDocument`] variant, dispatching to the kind's checks.
pub fn validate_document(doc: &RuleDocument) -> ValidationResult {
    let mut result = ValidationResult::new();
    match doc {
        RuleDocument::KeywordConfig(rule) => config_checks::validate_keyword_config(rule, &mut result),
        RuleDocument::ScoringConfig(rule) => config_checks::validate_scoring_config(rule, &mut result),
    }
    result
}

/// Parse raw YAML and validate. Parse failures are reported as errors.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    let envelope: RuleEnvelope = match serde_yaml::from_str(yaml) {
        Ok(envelope) => envelope,
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", format!("YAML parse error: {e}"));
            return result;
        }
    };

    if envelope.rule_kind().is_err() {
        let known: Vec<&str> = RuleKind::ALL.iter().map(|k| k.as_str()).collect();
        let mut result = ValidationResult::new();
        result.error_with_suggestion(
            "kind",
            format!("unknown rule kind '{}'", envelope.kind),
            fuzzy::fuzzy_match(&envelope.kind, &known).map(str::to_string),
        );
        return result;
    }

    match envelope.parse_full() {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("spec", e);
            result
        }
    }
}
