//! Simple and exponential moving averages.

/// Arithmetic mean of the last `period` prices.
pub fn sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let window = &prices[prices.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average as of the last price.
///
/// Seeded with the SMA of the *first* `period` prices and walked forward over
/// the rest with multiplier `2 / (period + 1)`. Pass the full history: a
/// truncated slice gives a different (re-seeded) value than an EMA maintained
/// over the whole series.
pub fn ema(prices: &[f64], period: usize) -> Option<f64> {
    ema_series(prices, period).last().copied()
}

/// EMA value at every index from `period - 1` onward.
pub(crate) fn ema_series(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed = prices[..period].iter().sum::<f64>() / period as f64;

    let mut series = Vec::with_capacity(prices.len() - period + 1);
    series.push(seed);

    let mut ema = seed;
    for &price in &prices[period..] {
        ema = (price - ema) * multiplier + ema;
        series.push(ema);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_insufficient_data() {
        assert!(sma(&[1.0, 2.0], 3).is_none());
        assert!(sma(&[1.0, 2.0], 0).is_none());
    }

    #[test]
    fn test_sma_uses_trailing_window() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sma(&prices, 2), Some(4.5));
        assert_eq!(sma(&prices, 5), Some(3.0));
    }

    #[test]
    fn test_sma_ignores_prefix() {
        let tail = [10.0, 11.0, 12.0, 13.0];
        let mut extended = vec![500.0, -3.0, 42.0];
        extended.extend_from_slice(&tail);

        assert_eq!(sma(&tail, 4), sma(&extended, 4));
    }

    #[test]
    fn test_ema_seeds_with_sma() {
        let prices = [2.0, 4.0, 6.0];
        assert_eq!(ema(&prices, 3), Some(4.0));
    }

    #[test]
    fn test_ema_recursion() {
        // Seed SMA(1,2,3) = 2, multiplier 2/4 = 0.5
        // 4 -> (4-2)*0.5+2 = 3; 5 -> (5-3)*0.5+3 = 4
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        let value = ema(&prices, 3).unwrap();
        assert!((value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_ema_depends_on_full_history() {
        let full = [10.0, 10.0, 10.0, 20.0, 20.0, 20.0];
        let recent = &full[3..];

        // Re-seeding from a recent slice diverges from the full-history EMA.
        assert_eq!(ema(recent, 3), Some(20.0));
        assert!(ema(&full, 3).unwrap() < 20.0);
    }

    #[test]
    fn test_ema_insufficient_data() {
        assert!(ema(&[1.0, 2.0], 3).is_none());
        assert!(ema_series(&[1.0, 2.0], 3).is_empty());
    }
}
