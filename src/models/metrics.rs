//! Trading performance metrics over a journal time window.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Look-back window applied to journal trades before computing metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
    #[serde(rename = "all")]
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "1d",
            TimeWindow::Week => "7d",
            TimeWindow::Month => "30d",
            TimeWindow::Quarter => "90d",
            TimeWindow::Year => "1y",
            TimeWindow::All => "all",
        }
    }

    /// Length of the window, or `None` for the unbounded window.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            TimeWindow::Day => Some(Duration::days(1)),
            TimeWindow::Week => Some(Duration::days(7)),
            TimeWindow::Month => Some(Duration::days(30)),
            TimeWindow::Quarter => Some(Duration::days(90)),
            TimeWindow::Year => Some(Duration::days(365)),
            TimeWindow::All => None,
        }
    }

    /// Whether an entry at `at` falls inside the window ending at `now`.
    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.duration() {
            Some(duration) => at >= now - duration,
            None => true,
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" | "day" => Ok(TimeWindow::Day),
            "7d" | "week" => Ok(TimeWindow::Week),
            "30d" | "month" => Ok(TimeWindow::Month),
            "90d" | "quarter" => Ok(TimeWindow::Quarter),
            "1y" | "365d" | "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            other => Err(format!("unknown time window '{}' (expected 1d, 7d, 30d, 90d, 1y, all)", other)),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance and risk statistics for one user over one time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub time_window: TimeWindow,

    // === Basic Statistics ===
    /// Trades inside the window
    pub total_trades: u32,

    pub winning_trades: u32,

    pub losing_trades: u32,

    /// Win rate in percent (0-100)
    pub win_rate: f64,

    /// Sum of realized profit
    pub total_profit: f64,

    /// Mean profit per trade
    pub average_profit: f64,

    /// Mean profit of winning trades
    pub average_win: f64,

    /// Mean loss of losing trades (absolute value)
    pub average_loss: f64,

    /// Best single trade (0 without winners)
    pub largest_win: f64,

    /// Worst single trade, negative (0 without losers)
    pub largest_loss: f64,

    // === Risk Metrics ===
    /// Gross profit / gross loss (0 without losers)
    pub profit_factor: f64,

    /// Largest peak-to-trough fall of cumulative profit, in account currency
    pub max_drawdown: f64,

    /// Mean per-trade return over its standard deviation, no risk-free rate
    pub sharpe_ratio: f64,

    /// Used margin as a percentage of equity across the user's accounts
    pub risk_to_equity_ratio: f64,
}

impl RiskMetrics {
    /// Zeroed metrics for a window with no trades.
    pub fn empty(time_window: TimeWindow) -> Self {
        Self {
            time_window,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate: 0.0,
            total_profit: 0.0,
            average_profit: 0.0,
            average_win: 0.0,
            average_loss: 0.0,
            largest_win: 0.0,
            largest_loss: 0.0,
            profit_factor: 0.0,
            max_drawdown: 0.0,
            sharpe_ratio: 0.0,
            risk_to_equity_ratio: 0.0,
        }
    }
}

impl Default for RiskMetrics {
    fn default() -> Self {
        Self::empty(TimeWindow::default())
    }
}
