//! Trading journal entries consumed by the metrics calculator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a journal trade.
///
/// Journal exports use "Buy"/"Sell"; older entries use "Long"/"Short".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    #[serde(alias = "BUY", alias = "buy", alias = "Long", alias = "LONG", alias = "long")]
    Buy,
    #[serde(alias = "SELL", alias = "sell", alias = "Short", alias = "SHORT", alias = "short")]
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "Buy",
            TradeType::Sell => "Sell",
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, TradeType::Buy)
    }
}

impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" | "long" => Ok(TradeType::Buy),
            "sell" | "short" => Ok(TradeType::Sell),
            other => Err(format!("unknown trade type '{}' (expected buy/long/sell/short)", other)),
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One closed trade from a user's journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Realized profit (negative for a loss)
    pub profit: f64,

    /// When the position was opened
    pub entry_date: DateTime<Utc>,

    pub trade_type: TradeType,

    /// Instrument, e.g. "EURUSD"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Owner of the journal entry, used for leaderboard grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trader: Option<String>,
}

impl TradeRecord {
    pub fn new(profit: f64, entry_date: DateTime<Utc>, trade_type: TradeType) -> Self {
        Self {
            profit,
            entry_date,
            trade_type,
            symbol: None,
            trader: None,
        }
    }

    pub fn with_trader(mut self, trader: impl Into<String>) -> Self {
        self.trader = Some(trader.into());
        self
    }

    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }
}
