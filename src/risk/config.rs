//! Risk thresholds.

use serde::{Deserialize, Serialize};

/// Configuration for position sizing and risk assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Hard ceiling on a position size as a fraction of balance, regardless of
    /// the requested risk percentage
    pub max_position_fraction: f64,

    /// Margin level (%) below which risk is Critical
    pub critical_margin_level: f64,

    /// Margin level (%) below which risk is High
    pub high_margin_level: f64,

    /// Margin level (%) below which risk is Medium
    pub medium_margin_level: f64,

    /// Used margin as % of equity above which risk is at least High
    pub max_risk_to_equity: f64,

    /// Max drawdown as a fraction of equity that triggers a warning
    pub max_drawdown_fraction: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_position_fraction: 0.1,   // 10% of balance
            critical_margin_level: 100.0,
            high_margin_level: 150.0,
            medium_margin_level: 200.0,
            max_risk_to_equity: 50.0,
            max_drawdown_fraction: 0.2,   // 20% of equity
        }
    }
}
