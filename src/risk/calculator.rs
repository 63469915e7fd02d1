//! Single-trade calculators: position size, margin, risk/reward.

use serde::{Deserialize, Serialize};

use crate::models::TradeType;

use super::RiskConfig;

/// Fixed-risk position sizing with a hard balance cap.
#[derive(Debug, Clone, Default)]
pub struct PositionSizer {
    config: RiskConfig,
}

impl PositionSizer {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Position size (in lots) risking `risk_pct` percent of `balance` over
    /// a stop of `stop_loss_pips`.
    ///
    /// size = (balance * risk_pct / 100) / stop_loss_pips / pip_value
    ///
    /// The result is clamped to `[0, balance * max_position_fraction]`. That
    /// ceiling is a safety cap separate from `risk_pct`: asking to risk 50%
    /// still cannot size past 10% of balance. Zero or non-finite inputs give 0.
    ///
    /// There is no lot-size argument: lot size does not enter the formula, and
    /// the result is already expressed in lots.
    pub fn position_size(&self, balance: f64, risk_pct: f64, stop_loss_pips: f64, pip_value: f64) -> f64 {
        let inputs = [balance, risk_pct, stop_loss_pips, pip_value];
        if inputs.iter().any(|v| *v == 0.0 || !v.is_finite()) || balance < 0.0 {
            return 0.0;
        }

        let risk_amount = balance * risk_pct / 100.0;
        let risk_per_pip = risk_amount / stop_loss_pips;
        let size = risk_per_pip / pip_value;

        let cap = balance * self.config.max_position_fraction;
        size.max(0.0).min(cap)
    }
}

/// Parse broker leverage notation ("1:500") into its divisor.
///
/// Anything without a positive number after the colon counts as 1.
pub fn parse_leverage(leverage: &str) -> f64 {
    leverage
        .split_once(':')
        .and_then(|(_, ratio)| ratio.trim().parse::<f64>().ok())
        .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
        .unwrap_or(1.0)
}

/// Required margin: `lot_size * contract_size * price / leverage`.
pub fn margin(lot_size: f64, contract_size: f64, leverage: &str, price: f64) -> f64 {
    lot_size * contract_size * price / parse_leverage(leverage)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskReward {
    /// reward / risk
    pub ratio: f64,
    pub risk: f64,
    pub reward: f64,
}

/// Risk/reward of a trade setup.
///
/// Returns `None` for an invalid setup: a stop loss on the wrong side of (or
/// at) the entry price.
pub fn risk_reward(entry: f64, stop_loss: f64, take_profit: f64, trade_type: TradeType) -> Option<RiskReward> {
    let (risk, reward) = if trade_type.is_long() {
        (entry - stop_loss, take_profit - entry)
    } else {
        (stop_loss - entry, entry - take_profit)
    };

    if risk <= 0.0 || !risk.is_finite() {
        return None;
    }

    Some(RiskReward {
        ratio: reward / risk,
        risk,
        reward,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_size_basic() {
        let sizer = PositionSizer::default();

        // Risk 1% of 10k = 100; over 20 pips = 5/pip; at $10/pip = 0.5 lots
        let size = sizer.position_size(10_000.0, 1.0, 20.0, 10.0);
        assert!((size - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_position_size_cap() {
        let sizer = PositionSizer::default();

        // 5000 / 10 / 10 = 50, under the 10%-of-balance cap of 1000
        let within_cap = sizer.position_size(10_000.0, 50.0, 10.0, 10.0);
        assert!((within_cap - 50.0).abs() < 1e-12);

        let huge = sizer.position_size(10_000.0, 50.0, 0.001, 0.001);
        assert_eq!(huge, 1_000.0);
    }

    #[test]
    fn test_position_size_zero_inputs() {
        let sizer = PositionSizer::default();

        assert_eq!(sizer.position_size(0.0, 1.0, 20.0, 10.0), 0.0);
        assert_eq!(sizer.position_size(10_000.0, 0.0, 20.0, 10.0), 0.0);
        assert_eq!(sizer.position_size(10_000.0, 1.0, 0.0, 10.0), 0.0);
        assert_eq!(sizer.position_size(10_000.0, 1.0, 20.0, 0.0), 0.0);
        assert_eq!(sizer.position_size(f64::NAN, 1.0, 20.0, 10.0), 0.0);
    }

    #[test]
    fn test_position_size_negative_clamps_to_zero() {
        let sizer = PositionSizer::default();
        assert_eq!(sizer.position_size(10_000.0, -5.0, 20.0, 10.0), 0.0);
    }

    #[test]
    fn test_margin() {
        let value = margin(1.0, 100_000.0, "1:500", 1.2);
        assert!((value - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_leverage() {
        assert_eq!(parse_leverage("1:500"), 500.0);
        assert_eq!(parse_leverage("1: 30"), 30.0);
        assert_eq!(parse_leverage("500"), 1.0);
        assert_eq!(parse_leverage("1:abc"), 1.0);
        assert_eq!(parse_leverage("1:0"), 1.0);
    }

    #[test]
    fn test_risk_reward_long() {
        let rr = risk_reward(1.1000, 1.0950, 1.1100, TradeType::Buy).unwrap();
        assert!((rr.risk - 0.0050).abs() < 1e-12);
        assert!((rr.reward - 0.0100).abs() < 1e-12);
        assert!((rr.ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_risk_reward_short() {
        let rr = risk_reward(1.1000, 1.1050, 1.0900, TradeType::Sell).unwrap();
        assert!((rr.ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_risk_reward_invalid_stop() {
        // Buy with the stop above entry
        assert!(risk_reward(1.1000, 1.1050, 1.1200, TradeType::Buy).is_none());
        // Stop exactly at entry
        assert!(risk_reward(1.1000, 1.1000, 1.1200, TradeType::Buy).is_none());
        // Sell with the stop below entry
        assert!(risk_reward(1.1000, 1.0950, 1.0900, TradeType::Sell).is_none());
    }
}
