use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Trading-period label as written by the loader (`2024-01-02`,
/// `2024-01-02 00:00:00-05:00`, ...).
///
/// Ordering is lexical; within one file the loader emits a single format so
/// lexical order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BarDate(String);

impl BarDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyBarDate);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for BarDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BarDate> for String {
    fn from(value: BarDate) -> Self {
        value.0
    }
}

/// One daily OHLCV observation.
///
/// Every numeric field is optional: the loader copies whatever columns the
/// provider returned, and a bar without a close is still part of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: BarDate,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjclose: Option<f64>,
}

impl Bar {
    pub fn new(date: BarDate, close: Option<f64>) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
            adjclose: None,
        }
    }

    /// Close price if present and finite.
    pub fn usable_close(&self) -> Option<f64> {
        self.close.filter(|close| close.is_finite())
    }
}

/// Bars for one symbol, sorted ascending by date with unique dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Sorts bars by date and drops later bars that repeat an earlier date.
    ///
    /// The sort is stable, so among duplicates the first one in input order
    /// survives.
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by(|left, right| left.date.cmp(&right.date));
        bars.dedup_by(|later, earlier| later.date == earlier.date);
        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Usable close of every bar, oldest first.
    pub fn closes(&self) -> Vec<Option<f64>> {
        self.bars.iter().map(Bar::usable_close).collect()
    }

    /// The two most recent bars as `(prev, last)`.
    pub fn last_two(&self) -> Option<(&Bar, &Bar)> {
        match self.bars.as_slice() {
            [.., prev, last] => Some((prev, last)),
            _ => None,
        }
    }
}
