//! Price observations fed to the indicator engine.

use serde::{Deserialize, Serialize};

/// One observation in a chronological price series (oldest first).
///
/// `high` and `low` are optional; when absent they fall back to `price`,
/// so a bare list of closes is a valid series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPricePoint")]
pub struct PricePoint {
    pub price: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
}

/// Wire shapes accepted for a price point: `101.5` or `{"price": 101.5, "high": ..}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPricePoint {
    Bare(f64),
    Full {
        #[serde(alias = "close")]
        price: f64,
        #[serde(default)]
        high: Option<f64>,
        #[serde(default)]
        low: Option<f64>,
    },
}

impl From<RawPricePoint> for PricePoint {
    fn from(raw: RawPricePoint) -> Self {
        match raw {
            RawPricePoint::Bare(price) => Self::close(price),
            RawPricePoint::Full { price, high, low } => Self { price, high, low },
        }
    }
}

impl PricePoint {
    /// Point carrying only a closing price.
    pub fn close(price: f64) -> Self {
        Self {
            price,
            high: None,
            low: None,
        }
    }

    pub fn with_range(price: f64, high: f64, low: f64) -> Self {
        Self {
            price,
            high: Some(high),
            low: Some(low),
        }
    }

    pub fn high(&self) -> f64 {
        self.high.unwrap_or(self.price)
    }

    pub fn low(&self) -> f64 {
        self.low.unwrap_or(self.price)
    }

    /// Split a series into parallel close/high/low vectors.
    pub fn split(points: &[PricePoint]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let closes = points.iter().map(|p| p.price).collect();
        let highs = points.iter().map(PricePoint::high).collect();
        let lows = points.iter().map(PricePoint::low).collect();
        (closes, highs, lows)
    }
}
