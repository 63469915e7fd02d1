//! Price levels: percentile support/resistance and Fibonacci retracements.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
    /// Latest price, for reference
    pub current_price: f64,
}

/// Support at the 10th and resistance at the 90th percentile of the trailing
/// `lookback` prices.
pub fn support_resistance(prices: &[f64], lookback: usize) -> Option<SupportResistance> {
    if lookback == 0 || prices.len() < lookback {
        return None;
    }

    let mut window = prices[prices.len() - lookback..].to_vec();
    window.sort_by(|a, b| a.total_cmp(b));

    let n = window.len() as f64;
    let support_idx = (n * 0.1).floor() as usize;
    let resistance_idx = ((n * 0.9).floor() as usize).min(window.len() - 1);

    Some(SupportResistance {
        support: window[support_idx],
        resistance: window[resistance_idx],
        current_price: *prices.last()?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    /// Retracement ratio as a percentage label, e.g. "61.8%"
    pub level: String,
    pub price: f64,
}

const FIBONACCI_RATIOS: [(&str, f64); 5] = [
    ("23.6%", 0.236),
    ("38.2%", 0.382),
    ("50%", 0.5),
    ("61.8%", 0.618),
    ("78.6%", 0.786),
];

/// Retracement prices between a swing `high` and `low`.
pub fn fibonacci(high: f64, low: f64) -> Vec<FibonacciLevel> {
    let range = high - low;

    FIBONACCI_RATIOS
        .iter()
        .map(|&(label, ratio)| FibonacciLevel {
            level: label.to_string(),
            price: high - range * ratio,
        })
        .collect()
}
