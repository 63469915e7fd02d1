//! Data models for price series, signals, journal trades, accounts, and metrics.

mod account;
mod assessment;
mod leaderboard;
mod metrics;
mod price;
mod signal;
mod trade;

pub use account::{AccountExposure, AccountSnapshot, ExposureReport};
pub use assessment::{RiskAssessment, RiskLevel};
pub use leaderboard::LeaderboardEntry;
pub use metrics::{RiskMetrics, TimeWindow};
pub use price::PricePoint;
pub use signal::{Recommendation, Signal, SignalDirection, SignalReport, SignalStrength, SignalSummary};
pub use trade::{TradeRecord, TradeType};
