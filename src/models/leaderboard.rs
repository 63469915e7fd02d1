//! Social trading leaderboard rows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position on the board
    pub rank: usize,
    pub trader: String,
    pub total_trades: u32,
    /// Win rate in percent (0-100)
    pub win_rate: f64,
    pub total_profit: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    /// Composite ranking score (0-100)
    pub score: f64,
}
