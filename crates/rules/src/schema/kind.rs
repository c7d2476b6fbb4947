//! Rule kind enum for two-pass deserialization dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported rule kinds for two-pass deserialization dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    KeywordConfig,
    ScoringConfig,
}

impl RuleKind {
    /// Every supported kind, in the order they are documented.
    pub const ALL: [RuleKind; 2] = [RuleKind::KeywordConfig, RuleKind::ScoringConfig];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::KeywordConfig => "KeywordConfig",
            RuleKind::ScoringConfig => "ScoringConfig",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "KeywordConfig" => Ok(RuleKind::KeywordConfig),
            "ScoringConfig" => Ok(RuleKind::ScoringConfig),
            other => Err(format!("unknown rule kind: '{}'", other)),
        }
    }
}
