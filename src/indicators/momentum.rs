//! Momentum oscillators: RSI, MACD, Stochastic.

use serde::{Deserialize, Serialize};

use super::moving_average::{ema, ema_series};

// =============================================================================
// RSI (Wilder's smoothing)
// =============================================================================

/// Relative Strength Index as of the last price.
///
/// Averages of the first `period` changes seed the gain/loss averages, which
/// are then Wilder-smoothed over the rest of the series. When the smoothed
/// average loss is zero the result is exactly 100.
pub fn rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let period_f = period as f64;

    let (gain_sum, loss_sum) = changes[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(gains, losses), &change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let mut avg_gain = gain_sum / period_f;
    let mut avg_loss = loss_sum / period_f;

    for &change in &changes[period..] {
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

// =============================================================================
// MACD
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD line as `EMA(fast) - EMA(slow)`.
///
/// Known approximation: the signal line is set equal to the MACD line, so the
/// histogram is always 0. Consumers (including the signal aggregator) rely on
/// this output; use [`macd_textbook`] for the signal line computed as an EMA
/// of the MACD history.
pub fn macd(prices: &[f64], fast: usize, slow: usize, _signal: usize) -> Option<MacdResult> {
    if prices.len() < slow {
        return None;
    }

    let line = ema(prices, fast)? - ema(prices, slow)?;
    let signal = line;

    Some(MacdResult {
        macd: line,
        signal,
        histogram: line - signal,
    })
}

/// Textbook MACD: the signal line is `EMA(signal)` of the MACD series.
///
/// Needs `slow + signal - 1` prices so that `signal` MACD values exist.
/// The MACD line itself matches [`macd`].
pub fn macd_textbook(prices: &[f64], fast: usize, slow: usize, signal: usize) -> Option<MacdResult> {
    if fast == 0 || fast > slow || signal == 0 || prices.len() < slow + signal - 1 {
        return None;
    }

    let fast_series = ema_series(prices, fast);
    let slow_series = ema_series(prices, slow);

    // fast_series[j] is the EMA at index fast - 1 + j (same for slow).
    let macd_series: Vec<f64> = (slow - 1..prices.len())
        .map(|i| fast_series[i + 1 - fast] - slow_series[i + 1 - slow])
        .collect();

    let line = *macd_series.last()?;
    let signal_line = ema(&macd_series, signal)?;

    Some(MacdResult {
        macd: line,
        signal: signal_line,
        histogram: line - signal_line,
    })
}

// =============================================================================
// Stochastic Oscillator
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticResult {
    pub k: f64,
    pub d: f64,
}

/// %K over the trailing `period` bars; 50 when the range is flat.
fn percent_k(highs: &[f64], lows: &[f64], close: f64) -> f64 {
    let highest = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = lows.iter().copied().fold(f64::INFINITY, f64::min);

    if highest == lowest {
        return 50.0;
    }

    (close - lowest) / (highest - lowest) * 100.0
}

/// Stochastic oscillator as of the last close.
///
/// Known approximation: `%D` equals `%K` (no smoothing). See
/// [`stochastic_textbook`] for `%D` as an SMA of recent `%K` values.
pub fn stochastic(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<StochasticResult> {
    if period == 0 || closes.len() < period || highs.len() < period || lows.len() < period {
        return None;
    }

    let k = percent_k(
        &highs[highs.len() - period..],
        &lows[lows.len() - period..],
        *closes.last()?,
    );

    Some(StochasticResult { k, d: k })
}

/// Stochastic oscillator with `%D = SMA(d_period)` of the trailing `%K` values.
///
/// Series must be the same length and hold at least `period + d_period - 1` bars.
pub fn stochastic_textbook(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    d_period: usize,
) -> Option<StochasticResult> {
    let len = closes.len();
    if period == 0 || d_period == 0 || highs.len() != len || lows.len() != len {
        return None;
    }
    if len < period + d_period - 1 {
        return None;
    }

    let k_values: Vec<f64> = (len - d_period..len)
        .map(|end| {
            let start = end + 1 - period;
            percent_k(&highs[start..=end], &lows[start..=end], closes[end])
        })
        .collect();

    let k = *k_values.last()?;
    let d = k_values.iter().sum::<f64>() / d_period as f64;

    Some(StochasticResult { k, d })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(count: usize) -> Vec<f64> {
        (0..count)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let prices: Vec<f64> = (0..14).map(|i| i as f64).collect();
        assert!(rsi(&prices, 14).is_none());

        let prices: Vec<f64> = (0..15).map(|i| i as f64).collect();
        assert!(rsi(&prices, 14).is_some());
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&prices, 14), Some(100.0));
    }

    #[test]
    fn test_rsi_all_losses_is_0() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
        assert_eq!(rsi(&prices, 14), Some(0.0));
    }

    #[test]
    fn test_rsi_bounded() {
        for len in [15, 30, 100] {
            let value = rsi(&wave(len), 14).unwrap();
            assert!((0.0..=100.0).contains(&value), "rsi {} out of range", value);
        }
    }

    #[test]
    fn test_rsi_known_value() {
        // Period 2: changes +1, -1 seed avg gain/loss 0.5/0.5;
        // then +2 -> gain (0.5+2)/2 = 1.25, loss 0.5/2 = 0.25, RS = 5
        let prices = [10.0, 11.0, 10.0, 12.0];
        let value = rsi(&prices, 2).unwrap();
        assert!((value - (100.0 - 100.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_macd_signal_equals_line() {
        let prices = wave(60);
        let result = macd(&prices, 12, 26, 9).unwrap();

        let expected = ema(&prices, 12).unwrap() - ema(&prices, 26).unwrap();
        assert!((result.macd - expected).abs() < 1e-12);
        assert_eq!(result.signal, result.macd);
        assert_eq!(result.histogram, 0.0);
    }

    #[test]
    fn test_macd_insufficient_data() {
        assert!(macd(&wave(25), 12, 26, 9).is_none());
        assert!(macd(&wave(26), 12, 26, 9).is_some());
    }

    #[test]
    fn test_macd_textbook_line_matches_simplified() {
        let prices = wave(80);
        let simple = macd(&prices, 12, 26, 9).unwrap();
        let textbook = macd_textbook(&prices, 12, 26, 9).unwrap();

        assert!((simple.macd - textbook.macd).abs() < 1e-9);
        assert!((textbook.histogram - (textbook.macd - textbook.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_textbook_needs_signal_history() {
        assert!(macd_textbook(&wave(33), 12, 26, 9).is_none());
        assert!(macd_textbook(&wave(34), 12, 26, 9).is_some());
    }

    #[test]
    fn test_stochastic_flat_range_is_50() {
        let flat = vec![1.1; 20];
        let result = stochastic(&flat, &flat, &flat, 14).unwrap();
        assert_eq!(result.k, 50.0);
        assert_eq!(result.d, 50.0);
    }

    #[test]
    fn test_stochastic_position_in_range() {
        let highs = vec![12.0, 13.0, 14.0];
        let lows = vec![8.0, 9.0, 10.0];
        let closes = vec![10.0, 11.0, 11.0];

        // Range 8..14, close 11 -> 50%
        let result = stochastic(&highs, &lows, &closes, 3).unwrap();
        assert!((result.k - 50.0).abs() < 1e-12);
        assert_eq!(result.d, result.k);
    }

    #[test]
    fn test_stochastic_bounded() {
        let closes = wave(50);
        let highs: Vec<f64> = closes.iter().map(|c| c + 0.5).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 0.5).collect();

        let result = stochastic(&highs, &lows, &closes, 14).unwrap();
        assert!((0.0..=100.0).contains(&result.k));
    }

    #[test]
    fn test_stochastic_insufficient_data() {
        let series = vec![1.0; 13];
        assert!(stochastic(&series, &series, &series, 14).is_none());
    }

    #[test]
    fn test_stochastic_textbook_smooths_k() {
        let highs = vec![10.0, 10.0, 10.0, 10.0];
        let lows = vec![0.0, 0.0, 0.0, 0.0];
        let closes = vec![0.0, 2.0, 4.0, 6.0];

        // %K over period 2 at the last three bars: 20, 40, 60
        let result = stochastic_textbook(&highs, &lows, &closes, 2, 3).unwrap();
        assert!((result.k - 60.0).abs() < 1e-12);
        assert!((result.d - 40.0).abs() < 1e-12);
    }
}
