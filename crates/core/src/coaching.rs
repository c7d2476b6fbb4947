//! Agent-facing coaching guidance.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingInsight {
    pub text: String,
    pub priority: Priority,
}

impl CoachingInsight {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            priority,
        }
    }
}

/// Sort insights highest priority first. Stable: equal priorities keep
/// generation order.
pub fn sort_by_priority(insights: &mut [CoachingInsight]) {
    insights.sort_by(|a, b| b.priority.cmp(&a.priority));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_is_descending_and_stable() {
        let mut insights = vec![
            CoachingInsight::new("a", Priority::Medium),
            CoachingInsight::new("b", Priority::Low),
            CoachingInsight::new("c", Priority::High),
            CoachingInsight::new("d", Priority::Medium),
        ];
        sort_by_priority(&mut insights);
        let texts: Vec<_> = insights.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["c", "a", "d", "b"]);
    }
}
