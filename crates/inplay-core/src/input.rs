//! Deserialization of the loader's JSON snapshot files.
//!
//! Prices file:
//!
//! ```json
//! { "generated_at": "...", "interval": "1d", "symbols": ["AAPL"],
//!   "prices": { "AAPL": [ { "date": "2024-01-02", "open": 1.0, "high": 1.0,
//!                           "low": 1.0, "close": 1.0, "volume": 10, "adjclose": 1.0 } ] } }
//! ```
//!
//! Fundamentals file:
//!
//! ```json
//! { "symbols": ["AAPL"], "data": { "AAPL": { "trading_snapshot": { "regularMarketOpen": 1.0 } } } }
//! ```
//!
//! Both files come from Python's `json.dump`, so missing pandas cells arrive
//! as bare `NaN` (and overflowing ones as `Infinity`). They are parsed with
//! `json5`, which accepts those tokens; non-finite prices are then unusable
//! in the same way as `null` ones.
//!
//! Map keys that are not valid symbols are collected as [`RejectedKey`]s
//! instead of failing the whole file. Price rows without a usable `date`
//! are dropped per row and counted in [`PriceInput::undated`].

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::{Bar, BarDate, CoreError, FundamentalsSnapshot, Symbol, ValidationError};

/// A map key that could not be used as a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedKey {
    pub key: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Invalid(ValidationError),
    /// Normalizes to a symbol another key already claimed.
    Duplicate(Symbol),
}

impl Display for RejectedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            RejectReason::Invalid(error) => write!(f, "ignored key '{}': {error}", self.key),
            RejectReason::Duplicate(symbol) => {
                write!(f, "ignored key '{}': duplicates symbol {symbol}", self.key)
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PricesFile {
    #[serde(default)]
    interval: Option<String>,
    prices: BTreeMap<String, Vec<PriceRow>>,
}

/// One price row as the loader writes it. Intraday rows may also carry a
/// `symbol` column, and rows whose index reset failed have no `date`.
#[derive(Debug, Clone, Deserialize)]
struct PriceRow {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    close: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default)]
    adjclose: Option<f64>,
}

/// pandas writes a missing timestamp as `NaT`.
const MISSING_DATE: &str = "NaT";

impl PriceRow {
    fn into_bar(self) -> Option<Bar> {
        let date = self
            .date
            .as_deref()
            .filter(|date| date.trim() != MISSING_DATE)
            .and_then(|date| BarDate::parse(date).ok())?;

        Some(Bar {
            date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            adjclose: self.adjclose,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FundamentalsFile {
    data: BTreeMap<String, FundamentalsSnapshot>,
}

/// Validated contents of a prices file.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceInput {
    pub interval: Option<String>,
    pub prices: BTreeMap<Symbol, Vec<Bar>>,
    pub rejected: Vec<RejectedKey>,
    /// Rows dropped per symbol because they had no usable date.
    pub undated: BTreeMap<Symbol, usize>,
}

impl PriceInput {
    pub fn from_json(content: &str) -> Result<Self, CoreError> {
        let file = json5::from_str::<PricesFile>(content)?;
        let (rows, rejected) = keyed_by_symbol(file.prices);

        let mut prices = BTreeMap::new();
        let mut undated = BTreeMap::new();
        for (symbol, rows) in rows {
            let total = rows.len();
            let bars = rows
                .into_iter()
                .filter_map(PriceRow::into_bar)
                .collect::<Vec<_>>();

            let dropped = total - bars.len();
            if dropped > 0 {
                warn!(%symbol, dropped, "dropped price rows without a date");
                undated.insert(symbol.clone(), dropped);
            }
            prices.insert(symbol, bars);
        }

        Ok(Self {
            interval: file.interval,
            prices,
            rejected,
            undated,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        Self::from_json(&read(path)?)
    }
}

/// Validated contents of a fundamentals file.
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalsInput {
    pub fundamentals: BTreeMap<Symbol, FundamentalsSnapshot>,
    pub rejected: Vec<RejectedKey>,
}

impl FundamentalsInput {
    pub fn from_json(content: &str) -> Result<Self, CoreError> {
        let file = json5::from_str::<FundamentalsFile>(content)?;
        let (fundamentals, rejected) = keyed_by_symbol(file.data);
        Ok(Self {
            fundamentals,
            rejected,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        Self::from_json(&read(path)?)
    }
}

fn read(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|source| CoreError::io(path, source))
}

fn keyed_by_symbol<T>(raw: BTreeMap<String, T>) -> (BTreeMap<Symbol, T>, Vec<RejectedKey>) {
    let mut keyed = BTreeMap::new();
    let mut rejected = Vec::new();

    for (key, value) in raw {
        let reason = match Symbol::parse(&key) {
            Ok(symbol) if keyed.contains_key(&symbol) => RejectReason::Duplicate(symbol),
            Ok(symbol) => {
                keyed.insert(symbol, value);
                continue;
            }
            Err(error) => RejectReason::Invalid(error),
        };

        let rejection = RejectedKey { key, reason };
        warn!(%rejection, "rejected input key");
        rejected.push(rejection);
    }

    (keyed, rejected)
}
