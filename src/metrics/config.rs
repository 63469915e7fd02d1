//! Leaderboard selection settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Minimum journal trades in the window to appear on the board
    pub min_trades: u32,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { min_trades: 5 }
    }
}
