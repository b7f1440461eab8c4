use serde::{Deserialize, Serialize};

/// Same-day market fields published next to the fundamentals.
///
/// Field names follow the provider's quote payload. Absent means unknown,
/// never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradingSnapshot {
    #[serde(rename = "regularMarketOpen", default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(rename = "regularMarketDayHigh", default, skip_serializing_if = "Option::is_none")]
    pub day_high: Option<f64>,
    #[serde(rename = "regularMarketDayLow", default, skip_serializing_if = "Option::is_none")]
    pub day_low: Option<f64>,
    #[serde(rename = "regularMarketVolume", default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(rename = "averageDailyVolume10Day", default, skip_serializing_if = "Option::is_none")]
    pub avg_volume_10d: Option<f64>,
    #[serde(rename = "regularMarketPreviousClose", default, skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,
}

/// Per-symbol fundamentals record.
///
/// The loader also writes profile, key-stat and ownership sections; the
/// engine only reads the trading snapshot, so the rest is ignored on
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_snapshot: Option<TradingSnapshot>,
}

impl FundamentalsSnapshot {
    pub fn with_trading_snapshot(trading_snapshot: TradingSnapshot) -> Self {
        Self {
            trading_snapshot: Some(trading_snapshot),
        }
    }

    /// Trading snapshot, or an all-unknown one when the section is missing.
    pub fn trading(&self) -> TradingSnapshot {
        self.trading_snapshot.clone().unwrap_or_default()
    }
}
