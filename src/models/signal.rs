//! Indicator votes and the aggregated trading recommendation.

use serde::{Deserialize, Serialize};

/// Direction of a single indicator vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

/// Final verdict of the signal aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Neutral,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
            Recommendation::Neutral => "NEUTRAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    Strong,
    Medium,
    Weak,
}

impl SignalStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::Strong => "Strong",
            SignalStrength::Medium => "Medium",
            SignalStrength::Weak => "Weak",
        }
    }
}

/// One vote cast by one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Indicator name (e.g. "RSI", "MACD", "Bollinger Bands")
    pub indicator: String,

    pub signal: SignalDirection,

    pub strength: SignalStrength,

    /// Indicator reading that triggered the vote
    pub value: f64,
}

/// Aggregated verdict over all indicator votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    pub signals: Vec<Signal>,
    pub recommendation: Recommendation,
    pub strength: SignalStrength,
    pub buy_signals: usize,
    pub sell_signals: usize,
}

/// Result of a signal evaluation.
///
/// Serializes either as the full summary or as
/// `{"signals": [], "summary": "Insufficient data"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SignalReport {
    Insufficient {
        signals: Vec<Signal>,
        summary: String,
    },
    Summary(SignalSummary),
}

impl SignalReport {
    pub const INSUFFICIENT_DATA: &'static str = "Insufficient data";

    pub fn insufficient() -> Self {
        SignalReport::Insufficient {
            signals: Vec::new(),
            summary: Self::INSUFFICIENT_DATA.to_string(),
        }
    }

    pub fn summary(&self) -> Option<&SignalSummary> {
        match self {
            SignalReport::Summary(summary) => Some(summary),
            SignalReport::Insufficient { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insufficient_report_shape() {
        let value = serde_json::to_value(SignalReport::insufficient()).unwrap();
        assert_eq!(value, json!({ "signals": [], "summary": "Insufficient data" }));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let report = SignalReport::Summary(SignalSummary {
            signals: vec![Signal {
                indicator: "RSI".to_string(),
                signal: SignalDirection::Sell,
                strength: SignalStrength::Strong,
                value: 82.0,
            }],
            recommendation: Recommendation::Neutral,
            strength: SignalStrength::Weak,
            buy_signals: 0,
            sell_signals: 1,
        });

        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value["recommendation"], "NEUTRAL");
        assert_eq!(value["strength"], "Weak");
        assert_eq!(value["sellSignals"], 1);
        assert_eq!(value["signals"][0]["signal"], "SELL");
        assert_eq!(value["signals"][0]["strength"], "Strong");
    }
}
