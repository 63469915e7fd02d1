//! Technical indicator engine: moving averages, oscillators, bands, price
//! levels, and the threshold-voting signal aggregator.
//!
//! Every function is pure and returns `None` when the series is shorter than
//! the indicator's window.

mod config;
mod levels;
mod momentum;
mod moving_average;
mod signals;
mod snapshot;
mod volatility;

pub use config::SignalConfig;
pub use levels::{fibonacci, support_resistance, FibonacciLevel, SupportResistance};
pub use momentum::{
    macd, macd_textbook, rsi, stochastic, stochastic_textbook, MacdResult, StochasticResult,
};
pub use moving_average::{ema, sma};
pub use signals::{trading_signals, SignalAggregator};
pub use snapshot::{snapshot, IndicatorSnapshot};
pub use volatility::{bollinger_bands, BollingerBands};
