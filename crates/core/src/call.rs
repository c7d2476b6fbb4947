//! Call characteristics: the externally produced input to an evaluation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EchoGuardError, Result};

/// Direction of a recorded interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Inbound,
    Outbound,
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallType::Inbound => write!(f, "inbound"),
            CallType::Outbound => write!(f, "outbound"),
        }
    }
}

impl FromStr for CallType {
    type Err = EchoGuardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbound" => Ok(CallType::Inbound),
            "outbound" => Ok(CallType::Outbound),
            _ => Err(EchoGuardError::InvalidCallType(s.to_string())),
        }
    }
}

/// Externally estimated likelihood that the interaction needs escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for EscalationRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscalationRisk::Low => write!(f, "low"),
            EscalationRisk::Medium => write!(f, "medium"),
            EscalationRisk::High => write!(f, "high"),
        }
    }
}

impl FromStr for EscalationRisk {
    type Err = EchoGuardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(EscalationRisk::Low),
            "medium" => Ok(EscalationRisk::Medium),
            "high" => Ok(EscalationRisk::High),
            _ => Err(EchoGuardError::InvalidEscalationRisk(s.to_string())),
        }
    }
}

/// Signals extracted from one recorded interaction.
///
/// Optional fields mean "no signal": the matching scoring rules are skipped.
/// `sentiment_score` is nominally in [-1, 1] but is not clamped or validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCharacteristics {
    pub duration_seconds: u32,
    pub call_type: CallType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_risk: Option<EscalationRisk>,
}

impl CallCharacteristics {
    /// A call with only metadata and no transcript or derived signals.
    pub fn new(duration_seconds: u32, call_type: CallType) -> Self {
        Self {
            duration_seconds,
            call_type,
            transcript: None,
            sentiment_score: None,
            escalation_risk: None,
        }
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    pub fn with_sentiment(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score);
        self
    }

    pub fn with_escalation_risk(mut self, risk: EscalationRisk) -> Self {
        self.escalation_risk = Some(risk);
        self
    }

    /// Parse a host-application JSON record (camelCase field names).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
