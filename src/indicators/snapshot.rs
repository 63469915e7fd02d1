//! One-shot computation of every indicator for a price series.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::PricePoint;

use super::config::SignalConfig;
use super::levels::{support_resistance, SupportResistance};
use super::momentum::{macd, rsi, stochastic, MacdResult, StochasticResult};
use super::moving_average::{ema, sma};
use super::volatility::{bollinger_bands, BollingerBands};

/// Indicator name -> reading; `None` (serialized as `null`) when the series is
/// too short for that indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub ema12: Option<f64>,
    pub ema26: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdResult>,
    pub bollinger_bands: Option<BollingerBands>,
    pub stochastic: Option<StochasticResult>,
    pub support_resistance: Option<SupportResistance>,
}

/// Compute the standard indicator set with `config` periods.
pub fn snapshot(points: &[PricePoint], config: &SignalConfig) -> IndicatorSnapshot {
    let (closes, highs, lows) = PricePoint::split(points);

    let result = IndicatorSnapshot {
        sma20: sma(&closes, 20),
        sma50: sma(&closes, 50),
        ema12: ema(&closes, 12),
        ema26: ema(&closes, 26),
        rsi: rsi(&closes, config.rsi_period),
        macd: macd(&closes, config.macd_fast, config.macd_slow, config.macd_signal),
        bollinger_bands: bollinger_bands(&closes, config.bollinger_period, config.bollinger_std_dev),
        stochastic: stochastic(&highs, &lows, &closes, config.stochastic_period),
        support_resistance: support_resistance(&closes, config.support_resistance_lookback),
    };

    debug!(
        points = points.len(),
        withheld = result.withheld().len(),
        "Computed indicator snapshot"
    );

    result
}

impl IndicatorSnapshot {
    /// Names of indicators withheld for insufficient data.
    pub fn withheld(&self) -> Vec<&'static str> {
        [
            ("sma20", self.sma20.is_none()),
            ("sma50", self.sma50.is_none()),
            ("ema12", self.ema12.is_none()),
            ("ema26", self.ema26.is_none()),
            ("rsi", self.rsi.is_none()),
            ("macd", self.macd.is_none()),
            ("bollingerBands", self.bollinger_bands.is_none()),
            ("stochastic", self.stochastic.is_none()),
            ("supportResistance", self.support_resistance.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(count: usize) -> Vec<PricePoint> {
        (0..count)
            .map(|i| {
                let price = 1.1 + (i as f64 * 0.3).sin() * 0.01;
                PricePoint::with_range(price, price + 0.002, price - 0.002)
            })
            .collect()
    }

    #[test]
    fn test_short_series_withholds_long_windows() {
        let result = snapshot(&series(30), &SignalConfig::default());

        assert!(result.sma20.is_some());
        assert!(result.ema26.is_some());
        assert!(result.macd.is_some());
        assert!(result.stochastic.is_some());
        assert_eq!(result.withheld(), vec!["sma50"]);
    }

    #[test]
    fn test_empty_series_is_all_null() {
        let result = snapshot(&[], &SignalConfig::default());
        assert_eq!(result.withheld().len(), 9);

        let value = serde_json::to_value(&result).unwrap();
        assert!(value["rsi"].is_null());
        assert!(value["bollingerBands"].is_null());
    }

    #[test]
    fn test_stochastic_uses_point_ranges() {
        let points = series(20);
        let result = snapshot(&points, &SignalConfig::default());
        let k = result.stochastic.unwrap().k;

        // Ranges are wider than closes, so %K sits strictly inside the band
        assert!(k > 0.0 && k < 100.0);
    }
}
