//! Bollinger Bands.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::moving_average::sma;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands over the trailing `period` prices.
///
/// - `middle` = SMA(period)
/// - `upper` / `lower` = middle ± `std_dev_multiplier` * σ
///
/// σ is the population standard deviation of the trailing window.
pub fn bollinger_bands(prices: &[f64], period: usize, std_dev_multiplier: f64) -> Option<BollingerBands> {
    let middle = sma(prices, period)?;

    let window = &prices[prices.len() - period..];
    let std_dev = window.iter().population_std_dev();
    let band = std_dev * std_dev_multiplier;

    Some(BollingerBands {
        upper: middle + band,
        middle,
        lower: middle - band,
    })
}

impl BollingerBands {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
