//! Trading performance metrics and the leaderboard built on them.

mod calculator;
mod config;
mod leaderboard;

pub use calculator::MetricsCalculator;
pub use config::LeaderboardConfig;
pub use leaderboard::Leaderboard;
