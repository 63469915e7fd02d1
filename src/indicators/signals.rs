//! Threshold-voting signal aggregator.
//!
//! Each indicator casts at most one BUY or SELL vote:
//! - RSI below the oversold level => BUY (Strong), above overbought => SELL (Strong)
//! - MACD histogram above 0 => BUY (Medium), below 0 => SELL (Medium)
//! - Price below the lower Bollinger band => BUY (Medium), above upper => SELL (Medium)
//!
//! Votes are counted, not weighted. A direction wins only with a strict
//! majority and at least `min_votes` votes; anything else is NEUTRAL.

use tracing::debug;

use crate::models::{
    PricePoint, Recommendation, Signal, SignalDirection, SignalReport, SignalStrength,
    SignalSummary,
};

use super::config::SignalConfig;
use super::momentum::{macd, rsi};
use super::volatility::bollinger_bands;

/// Evaluates a price series into a [`SignalReport`].
#[derive(Debug, Clone, Default)]
pub struct SignalAggregator {
    config: SignalConfig,
}

impl SignalAggregator {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Collect indicator votes and reduce them to a recommendation.
    pub fn evaluate(&self, points: &[PricePoint]) -> SignalReport {
        if points.len() < self.config.min_points {
            debug!(
                points = points.len(),
                required = self.config.min_points,
                "Not enough price points for signals"
            );
            return SignalReport::insufficient();
        }

        let closes: Vec<f64> = points.iter().map(|p| p.price).collect();
        let signals = self.collect_votes(&closes);

        SignalReport::Summary(self.summarize(signals))
    }

    fn collect_votes(&self, closes: &[f64]) -> Vec<Signal> {
        let cfg = &self.config;
        let mut signals = Vec::new();

        if let Some(value) = rsi(closes, cfg.rsi_period) {
            if value < cfg.rsi_oversold {
                signals.push(vote("RSI", SignalDirection::Buy, SignalStrength::Strong, value));
            } else if value > cfg.rsi_overbought {
                signals.push(vote("RSI", SignalDirection::Sell, SignalStrength::Strong, value));
            }
        }

        // Histogram is 0 under the simplified MACD, so this never votes today.
        if let Some(result) = macd(closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal) {
            if result.histogram > 0.0 {
                signals.push(vote("MACD", SignalDirection::Buy, SignalStrength::Medium, result.histogram));
            } else if result.histogram < 0.0 {
                signals.push(vote("MACD", SignalDirection::Sell, SignalStrength::Medium, result.histogram));
            }
        }

        if let (Some(bands), Some(&price)) = (
            bollinger_bands(closes, cfg.bollinger_period, cfg.bollinger_std_dev),
            closes.last(),
        ) {
            if price < bands.lower {
                signals.push(vote("Bollinger Bands", SignalDirection::Buy, SignalStrength::Medium, price));
            } else if price > bands.upper {
                signals.push(vote("Bollinger Bands", SignalDirection::Sell, SignalStrength::Medium, price));
            }
        }

        signals
    }

    fn summarize(&self, signals: Vec<Signal>) -> SignalSummary {
        let buy_signals = signals
            .iter()
            .filter(|s| s.signal == SignalDirection::Buy)
            .count();
        let sell_signals = signals.len() - buy_signals;

        let (recommendation, strength) = if buy_signals > sell_signals && buy_signals >= self.config.min_votes {
            (Recommendation::Buy, self.directional_strength(buy_signals))
        } else if sell_signals > buy_signals && sell_signals >= self.config.min_votes {
            (Recommendation::Sell, self.directional_strength(sell_signals))
        } else {
            (Recommendation::Neutral, SignalStrength::Weak)
        };

        debug!(
            buy = buy_signals,
            sell = sell_signals,
            recommendation = recommendation.as_str(),
            "Aggregated indicator votes"
        );

        SignalSummary {
            signals,
            recommendation,
            strength,
            buy_signals,
            sell_signals,
        }
    }

    fn directional_strength(&self, votes: usize) -> SignalStrength {
        if votes >= self.config.strong_votes {
            SignalStrength::Strong
        } else {
            SignalStrength::Medium
        }
    }
}

fn vote(indicator: &str, signal: SignalDirection, strength: SignalStrength, value: f64) -> Signal {
    Signal {
        indicator: indicator.to_string(),
        signal,
        strength,
        value,
    }
}

/// Evaluate `points` with the default thresholds.
pub fn trading_signals(points: &[PricePoint]) -> SignalReport {
    SignalAggregator::default().evaluate(points)
}
