use thiserror::Error;

#[derive(Error, Debug)]
pub enum EchoGuardError {
    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid call type: '{0}' (expected 'inbound' or 'outbound')")]
    InvalidCallType(String),

    #[error("Invalid escalation risk: '{0}' (expected 'low', 'medium' or 'high')")]
    InvalidEscalationRisk(String),
}

impl From<serde_json::Error> for EchoGuardError {
    fn from(e: serde_json::Error) -> Self {
        EchoGuardError::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EchoGuardError>;
