//! Qualitative risk assessment as an ordered decision table.
//!
//! Rules run top to bottom. A triggered rule appends its warning and
//! recommendation (keeping the two lists parallel) and may raise the risk
//! level; no rule lowers it. Rule order is the output order.

use tracing::debug;

use crate::models::{ExposureReport, RiskAssessment, RiskLevel, RiskMetrics};

use super::RiskConfig;

type Predicate = fn(&ExposureReport, &RiskMetrics, &RiskConfig) -> bool;

struct Rule {
    name: &'static str,
    applies: Predicate,
    /// `None` for advisory rules that only add a warning
    severity: Option<RiskLevel>,
    warning: &'static str,
    recommendation: &'static str,
}

// A margin level of 0 (no accounts, or no margin in use) falls in the critical band.
fn margin_critical(e: &ExposureReport, _: &RiskMetrics, c: &RiskConfig) -> bool {
    e.margin_level < c.critical_margin_level
}

fn margin_high(e: &ExposureReport, _: &RiskMetrics, c: &RiskConfig) -> bool {
    e.margin_level >= c.critical_margin_level && e.margin_level < c.high_margin_level
}

fn margin_medium(e: &ExposureReport, _: &RiskMetrics, c: &RiskConfig) -> bool {
    e.margin_level >= c.high_margin_level && e.margin_level < c.medium_margin_level
}

fn risk_to_equity(_: &ExposureReport, m: &RiskMetrics, c: &RiskConfig) -> bool {
    m.risk_to_equity_ratio > c.max_risk_to_equity
}

fn deep_drawdown(e: &ExposureReport, m: &RiskMetrics, c: &RiskConfig) -> bool {
    m.max_drawdown > c.max_drawdown_fraction * e.total_equity
}

const RULES: &[Rule] = &[
    Rule {
        name: "margin_critical",
        applies: margin_critical,
        severity: Some(RiskLevel::Critical),
        warning: "Margin level is below 100%; positions are at risk of stop out",
        recommendation: "Close losing positions or deposit funds immediately",
    },
    Rule {
        name: "margin_high",
        applies: margin_high,
        severity: Some(RiskLevel::High),
        warning: "Margin level is below 150%",
        recommendation: "Reduce open exposure or add funds to the account",
    },
    Rule {
        name: "margin_medium",
        applies: margin_medium,
        severity: Some(RiskLevel::Medium),
        warning: "Margin level is below 200%",
        recommendation: "Monitor margin closely and avoid opening new positions",
    },
    Rule {
        name: "risk_to_equity",
        applies: risk_to_equity,
        severity: Some(RiskLevel::High),
        warning: "Used margin exceeds 50% of equity",
        recommendation: "Lower position sizes to reduce margin usage",
    },
    Rule {
        name: "drawdown",
        applies: deep_drawdown,
        severity: None,
        warning: "Maximum drawdown exceeds 20% of equity",
        recommendation: "Review the trading strategy and tighten stop losses",
    },
];

/// Evaluates exposure and metrics against [`RiskConfig`] thresholds.
#[derive(Debug, Clone, Default)]
pub struct RiskAssessor {
    config: RiskConfig,
}

impl RiskAssessor {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, exposure: &ExposureReport, metrics: &RiskMetrics) -> RiskAssessment {
        let mut assessment = RiskAssessment::new();

        for rule in RULES {
            if !(rule.applies)(exposure, metrics, &self.config) {
                continue;
            }

            debug!(rule = rule.name, "Risk rule triggered");

            if let Some(level) = rule.severity {
                assessment.escalate(level);
            }
            assessment.warnings.push(rule.warning.to_string());
            assessment.recommendations.push(rule.recommendation.to_string());
        }

        assessment
    }
}
