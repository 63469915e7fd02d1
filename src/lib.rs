//! fxdesk: risk metrics and technical analysis engines for a forex trading desk.
//!
//! - [`indicators`]: moving averages, oscillators, bands, levels, and the
//!   signal aggregator over a price series
//! - [`risk`]: position sizing, margin, risk/reward, exposure, and assessment
//! - [`metrics`]: journal performance metrics and the trader leaderboard
//! - [`store`]: async loading of exported records for the engines
//!
//! The engines are synchronous and stateless; only [`store`] performs I/O.

pub mod indicators;
pub mod metrics;
pub mod models;
pub mod risk;
pub mod store;
