//! Calculator for journal performance metrics: win rate, profit factor,
//! drawdown, Sharpe ratio, and margin usage.

use chrono::{DateTime, Utc};
use statrs::statistics::Statistics;

use crate::models::{ExposureReport, RiskMetrics, TimeWindow, TradeRecord};

/// Calculator for computing risk metrics from journal trades.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Calculate metrics over the trades inside `window` (ending at `now`).
    ///
    /// `exposure` supplies the margin/equity totals for the risk-to-equity
    /// ratio; without it the ratio is 0. An empty trade set yields zeroed
    /// metrics.
    pub fn calculate(
        trades: &[TradeRecord],
        window: TimeWindow,
        now: DateTime<Utc>,
        exposure: Option<&ExposureReport>,
    ) -> RiskMetrics {
        let mut metrics = RiskMetrics::empty(window);

        if let Some(exposure) = exposure {
            metrics.risk_to_equity_ratio = Self::risk_to_equity(exposure);
        }

        let mut in_window: Vec<&TradeRecord> = trades
            .iter()
            .filter(|t| window.contains(t.entry_date, now))
            .collect();

        if in_window.is_empty() {
            return metrics;
        }

        // Drawdown walks the equity curve in entry order
        in_window.sort_by_key(|t| t.entry_date);
        let profits: Vec<f64> = in_window.iter().map(|t| t.profit).collect();

        Self::calculate_pnl_metrics(&mut metrics, &in_window);
        metrics.max_drawdown = Self::max_drawdown(&profits);
        metrics.sharpe_ratio = Self::sharpe_ratio(&profits);

        metrics
    }

    /// Win/loss counts, averages, extremes, and profit factor.
    ///
    /// Breakeven trades count toward the total but are neither wins nor losses.
    fn calculate_pnl_metrics(metrics: &mut RiskMetrics, trades: &[&TradeRecord]) {
        let wins: Vec<f64> = trades.iter().filter(|t| t.is_win()).map(|t| t.profit).collect();
        let losses: Vec<f64> = trades.iter().filter(|t| t.is_loss()).map(|t| t.profit).collect();

        metrics.total_trades = trades.len() as u32;
        metrics.winning_trades = wins.len() as u32;
        metrics.losing_trades = losses.len() as u32;
        metrics.total_profit = trades.iter().map(|t| t.profit).sum();
        metrics.average_profit = metrics.total_profit / trades.len() as f64;
        metrics.win_rate = wins.len() as f64 / trades.len() as f64 * 100.0;

        let gross_profit: f64 = wins.iter().sum();
        let gross_loss: f64 = losses.iter().map(|l| l.abs()).sum();

        if !wins.is_empty() {
            metrics.average_win = gross_profit / wins.len() as f64;
            metrics.largest_win = wins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        }
        if !losses.is_empty() {
            metrics.average_loss = gross_loss / losses.len() as f64;
            metrics.largest_loss = losses.iter().copied().fold(f64::INFINITY, f64::min);
        }

        if gross_loss > 0.0 {
            metrics.profit_factor = gross_profit / gross_loss;
        }
    }

    /// Largest fall from a running peak of cumulative profit.
    ///
    /// The peak starts at 0, so losses before the first win count as drawdown.
    fn max_drawdown(profits: &[f64]) -> f64 {
        let mut cumulative = 0.0_f64;
        let mut peak = 0.0_f64;
        let mut max_dd = 0.0_f64;

        for profit in profits {
            cumulative += profit;
            peak = peak.max(cumulative);
            max_dd = max_dd.max(peak - cumulative);
        }

        max_dd
    }

    /// Mean per-trade return over its population standard deviation.
    ///
    /// No risk-free rate and no annualization. 0 with fewer than two trades or
    /// zero dispersion.
    fn sharpe_ratio(profits: &[f64]) -> f64 {
        if profits.len() < 2 {
            return 0.0;
        }

        let mean = profits.iter().mean();
        let std_dev = profits.iter().population_std_dev();

        if std_dev > 0.0 && std_dev.is_finite() {
            mean / std_dev
        } else {
            0.0
        }
    }

    /// Used margin as a percentage of equity.
    fn risk_to_equity(exposure: &ExposureReport) -> f64 {
        if exposure.total_equity > 0.0 {
            exposure.total_margin / exposure.total_equity * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeType;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn trade(profit: f64, days_ago: i64) -> TradeRecord {
        TradeRecord::new(profit, now() - Duration::days(days_ago), TradeType::Buy)
    }

    #[test]
    fn test_calculate_pnl_metrics() {
        let trades = vec![
            trade(100.0, 5), // Win
            trade(-50.0, 4), // Loss
            trade(200.0, 3), // Win
            trade(-30.0, 2), // Loss
            trade(150.0, 1), // Win
        ];

        let metrics = MetricsCalculator::calculate(&trades, TimeWindow::Month, now(), None);

        assert_eq!(metrics.total_trades, 5);
        assert_eq!(metrics.winning_trades, 3);
        assert_eq!(metrics.losing_trades, 2);
        assert!((metrics.win_rate - 60.0).abs() < 1e-9);
        assert!((metrics.total_profit - 370.0).abs() < 1e-9);
        assert!((metrics.average_profit - 74.0).abs() < 1e-9);
        assert_eq!(metrics.largest_win, 200.0);
        assert_eq!(metrics.largest_loss, -50.0);
        assert!((metrics.average_win - 150.0).abs() < 1e-9);
        assert!((metrics.average_loss - 40.0).abs() < 1e-9);
        // 450 / 80
        assert!((metrics.profit_factor - 5.625).abs() < 1e-9);
    }

    #[test]
    fn test_breakeven_trades_count_but_neither_win_nor_lose() {
        let trades = vec![trade(40.0, 3), trade(0.0, 2), trade(-10.0, 1), trade(0.0, 0)];
        let metrics = MetricsCalculator::calculate(&trades, TimeWindow::Month, now(), None);

        assert_eq!(metrics.total_trades, 4);
        assert_eq!(metrics.winning_trades, 1);
        assert_eq!(metrics.losing_trades, 1);
        assert!((metrics.win_rate - 25.0).abs() < 1e-9);
        assert!((metrics.profit_factor - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_drawdown_sorted_by_entry_date() {
        // Listed out of order; by entry date the curve is
        // 100, 150, 70, 50, 150, 200 -> max drawdown 100
        let trades = vec![
            trade(100.0, 2),
            trade(-80.0, 4),
            trade(100.0, 10),
            trade(50.0, 1),
            trade(50.0, 5),
            trade(-20.0, 3),
        ];

        let metrics = MetricsCalculator::calculate(&trades, TimeWindow::Month, now(), None);
        assert!((metrics.max_drawdown - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_from_initial_losses() {
        let trades = vec![trade(-40.0, 3), trade(-60.0, 2), trade(30.0, 1)];
        let metrics = MetricsCalculator::calculate(&trades, TimeWindow::Week, now(), None);

        assert!((metrics.max_drawdown - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_filters_old_trades() {
        let trades = vec![trade(100.0, 2), trade(-500.0, 60)];

        let month = MetricsCalculator::calculate(&trades, TimeWindow::Month, now(), None);
        assert_eq!(month.total_trades, 1);
        assert_eq!(month.profit_factor, 0.0);

        let all = MetricsCalculator::calculate(&trades, TimeWindow::All, now(), None);
        assert_eq!(all.total_trades, 2);
        assert_eq!(all.time_window, TimeWindow::All);
    }

    #[test]
    fn test_sharpe_ratio() {
        // Mean 2, population σ 1
        let trades = vec![trade(1.0, 3), trade(3.0, 2), trade(1.0, 1), trade(3.0, 0)];
        let metrics = MetricsCalculator::calculate(&trades, TimeWindow::Month, now(), None);

        assert!((metrics.sharpe_ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sharpe_degenerate_inputs() {
        let single = vec![trade(50.0, 1)];
        let metrics = MetricsCalculator::calculate(&single, TimeWindow::Month, now(), None);
        assert_eq!(metrics.sharpe_ratio, 0.0);

        let identical = vec![trade(25.0, 3), trade(25.0, 2), trade(25.0, 1)];
        let metrics = MetricsCalculator::calculate(&identical, TimeWindow::Month, now(), None);
        assert_eq!(metrics.sharpe_ratio, 0.0);
        assert!(metrics.sharpe_ratio.is_finite());
    }

    #[test]
    fn test_empty_trades() {
        let metrics = MetricsCalculator::calculate(&[], TimeWindow::Quarter, now(), None);
        assert_eq!(metrics, RiskMetrics::empty(TimeWindow::Quarter));
    }

    #[test]
    fn test_risk_to_equity_from_exposure() {
        let exposure = ExposureReport {
            total_balance: 10_000.0,
            total_equity: 8_000.0,
            total_margin: 2_000.0,
            margin_level: 400.0,
            free_margin: 6_000.0,
            accounts: Vec::new(),
        };

        let metrics = MetricsCalculator::calculate(&[], TimeWindow::Month, now(), Some(&exposure));
        assert!((metrics.risk_to_equity_ratio - 25.0).abs() < 1e-9);
    }
}
