//! Indicator periods and signal thresholds.

use serde::{Deserialize, Serialize};

/// Parameters used by the signal aggregator and the indicator snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Minimum number of price points before any signal is produced
    pub min_points: usize,

    pub rsi_period: usize,

    /// RSI below this is oversold (BUY vote)
    pub rsi_oversold: f64,

    /// RSI above this is overbought (SELL vote)
    pub rsi_overbought: f64,

    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,

    pub stochastic_period: usize,

    pub support_resistance_lookback: usize,

    /// Votes needed for a directional recommendation
    pub min_votes: usize,

    /// Votes needed for a "Strong" recommendation
    pub strong_votes: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            min_points: 30,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            stochastic_period: 14,
            support_resistance_lookback: 20,
            min_votes: 2,
            strong_votes: 3,
        }
    }
}
