//! Social trading leaderboard: ranks traders by journal performance.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{LeaderboardEntry, RiskMetrics, TimeWindow, TradeRecord};
use super::{LeaderboardConfig, MetricsCalculator};

/// Builds a ranked leaderboard from journal trades tagged with their trader.
pub struct Leaderboard {
    config: LeaderboardConfig,
}

impl Leaderboard {
    pub fn new(config: LeaderboardConfig) -> Self {
        Self { config }
    }

    /// Rank traders over `window`, best first, keeping at most `limit` rows.
    ///
    /// Trades without a `trader` tag are ignored. Traders with fewer than
    /// `min_trades` trades in the window are left off the board.
    pub fn rank(
        &self,
        trades: &[TradeRecord],
        window: TimeWindow,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<LeaderboardEntry> {
        let mut by_trader: BTreeMap<&str, Vec<TradeRecord>> = BTreeMap::new();
        for trade in trades {
            if let Some(trader) = trade.trader.as_deref() {
                by_trader.entry(trader).or_default().push(trade.clone());
            }
        }

        let candidates: Vec<(&str, RiskMetrics)> = by_trader
            .into_iter()
            .map(|(trader, trades)| (trader, MetricsCalculator::calculate(&trades, window, now, None)))
            .filter(|(_, m)| m.total_trades >= self.config.min_trades)
            .collect();

        let best_profit = candidates
            .iter()
            .map(|(_, m)| m.total_profit)
            .fold(0.0_f64, f64::max);

        let mut entries: Vec<LeaderboardEntry> = candidates
            .into_iter()
            .map(|(trader, m)| LeaderboardEntry {
                rank: 0,
                trader: trader.to_string(),
                total_trades: m.total_trades,
                win_rate: m.win_rate,
                total_profit: m.total_profit,
                profit_factor: m.profit_factor,
                max_drawdown: m.max_drawdown,
                sharpe_ratio: m.sharpe_ratio,
                score: composite_score(&m, best_profit),
            })
            .collect();

        entries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.total_profit.partial_cmp(&a.total_profit).unwrap_or(Ordering::Equal))
                .then_with(|| a.trader.cmp(&b.trader))
        });
        entries.truncate(limit);

        for (idx, entry) in entries.iter_mut().enumerate() {
            entry.rank = idx + 1;
        }

        debug!(ranked = entries.len(), window = %window, "Built leaderboard");
        entries
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(LeaderboardConfig::default())
    }
}

/// Composite ranking score (0-100).
///
/// Weights:
/// - Win rate: 30 (60%+ gets full score)
/// - Profit factor: 25 (2.0+ gets full score)
/// - Sharpe ratio: 20 (1.0+ per trade gets full score)
/// - Profitability: 25 (relative to the most profitable trader on the board)
fn composite_score(m: &RiskMetrics, best_profit: f64) -> f64 {
    let win_rate_score = (m.win_rate / 60.0).min(1.0) * 30.0;
    let profit_factor_score = (m.profit_factor / 2.0).min(1.0) * 25.0;
    let sharpe_score = m.sharpe_ratio.clamp(0.0, 1.0) * 20.0;

    let profit_score = if best_profit > 0.0 && m.total_profit > 0.0 {
        m.total_profit / best_profit * 25.0
    } else {
        0.0
    };

    win_rate_score + profit_factor_score + sharpe_score + profit_score
}
