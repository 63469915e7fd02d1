//! Risk metrics engine: single-trade calculators, account exposure, and the
//! qualitative risk assessment.

mod assessment;
mod calculator;
mod config;
mod exposure;

pub use assessment::RiskAssessor;
pub use calculator::{margin, parse_leverage, risk_reward, PositionSizer, RiskReward};
pub use config::RiskConfig;
pub use exposure::account_exposure;
