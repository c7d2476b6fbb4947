//! Call-quality evaluation engine driven by YAML rule documents.
//!
//! This crate provides:
//! - Scoring engine: call characteristics → category scores + SOP violations
//! - Alert decision engine: first-match ordered alert rules
//! - Coaching insight generator: evaluation → agent-facing guidance
//! - YAML `KeywordConfig` / `ScoringConfig` documents with a hot-reloading loader
//! - Rule validation with "did you mean" suggestions

pub mod alert;
pub mod coaching;
pub mod keyword_config;
pub mod loader;
pub mod pipeline;
pub mod profile;
pub mod schema;
pub mod scoring;
pub mod scoring_config;
pub mod validation;

pub use alert::should_trigger_alert;
pub use coaching::generate_coaching_insights;
pub use pipeline::{Evaluator, InteractionReport};
pub use profile::EvaluationProfile;
pub use scoring::evaluate_call;
pub use loader::{RuleError, RuleLoader};
pub use validation::{validate_document, validate_yaml, ValidationResult};
