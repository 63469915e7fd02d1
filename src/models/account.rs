//! Trading account snapshots and the exposure report derived from them.

use serde::{Deserialize, Serialize};

/// Current state of one trading account, as read from the account store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    pub balance: f64,

    pub equity: f64,

    /// Margin currently used by open positions
    #[serde(default)]
    pub margin: f64,

    /// Leverage in broker notation, e.g. "1:500"
    #[serde(default = "default_leverage")]
    pub leverage: String,
}

fn default_leverage() -> String {
    "1:100".to_string()
}

impl AccountSnapshot {
    pub fn new(balance: f64, equity: f64, margin: f64, leverage: impl Into<String>) -> Self {
        Self {
            account_id: None,
            balance,
            equity,
            margin,
            leverage: leverage.into(),
        }
    }
}

/// Per-account line of an exposure report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountExposure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub balance: f64,
    pub equity: f64,
    pub margin: f64,
    pub leverage: String,
    /// Equity / margin as a percentage
    pub margin_level: f64,
    pub free_margin: f64,
}

/// Exposure aggregated over all of a user's accounts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureReport {
    pub total_balance: f64,
    pub total_equity: f64,
    pub total_margin: f64,
    /// Computed from the totals, not averaged across accounts
    pub margin_level: f64,
    pub free_margin: f64,
    pub accounts: Vec<AccountExposure>,
}
