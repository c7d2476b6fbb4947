//! Alert decision: whether and how urgently a human should be notified.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Outcome of the alert rules for one evaluation.
///
/// `severity` is `Low` and unused when `should_alert` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDecision {
    pub should_alert: bool,
    pub severity: Severity,
    pub reason: String,
}

impl AlertDecision {
    pub fn alert(severity: Severity, reason: impl Into<String>) -> Self {
        Self {
            should_alert: true,
            severity,
            reason: reason.into(),
        }
    }

    pub fn none(reason: impl Into<String>) -> Self {
        Self {
            should_alert: false,
            severity: Severity::Low,
            reason: reason.into(),
        }
    }
}
