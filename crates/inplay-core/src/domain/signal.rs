use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime};

/// Derived day-trading signals for one symbol.
///
/// Absent fields serialize as `null` so every record has the same keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: Symbol,
    pub close_return_1d: Option<f64>,
    pub gap_pct: Option<f64>,
    pub day_range_pct: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub vol_10d: Option<f64>,
    pub in_play_score: f64,
}

/// Signals produced by one engine run, keyed by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    pub generated_at: UtcDateTime,
    pub symbols: Vec<Symbol>,
    pub signals: BTreeMap<Symbol, Signal>,
}

impl SignalSet {
    pub fn new(generated_at: UtcDateTime, signals: BTreeMap<Symbol, Signal>) -> Self {
        Self {
            generated_at,
            symbols: signals.keys().cloned().collect(),
            signals,
        }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Signal> {
        self.signals.get(symbol)
    }

    /// Signals by descending in-play score; equal scores fall back to symbol order.
    pub fn ranked(&self) -> Vec<&Signal> {
        let mut ranked = self.signals.values().collect::<Vec<_>>();
        ranked.sort_by(|left, right| {
            right
                .in_play_score
                .total_cmp(&left.in_play_score)
                .then_with(|| left.symbol.cmp(&right.symbol))
        });
        ranked
    }
}
