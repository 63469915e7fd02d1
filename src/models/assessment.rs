//! Qualitative risk verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of an account's risk position, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk level plus the warnings and recommendations that produced it.
///
/// `warnings[i]` and `recommendations[i]` come from the same triggered rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    pub fn new() -> Self {
        Self {
            risk_level: RiskLevel::Low,
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Raise the level to `level` if it is more severe; never lowers it.
    pub fn escalate(&mut self, level: RiskLevel) {
        self.risk_level = self.risk_level.max(level);
    }
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalate_never_lowers() {
        let mut assessment = RiskAssessment::new();
        assessment.escalate(RiskLevel::Critical);
        assessment.escalate(RiskLevel::High);
        assert_eq!(assessment.risk_level, RiskLevel::Critical);
    }
}
