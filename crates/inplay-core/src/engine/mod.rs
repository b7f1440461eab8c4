//! # Signal Engine
//!
//! Pure transformation from price bars and trading snapshots into
//! [`Signal`]s.
//!
//! ```text
//! bars ──▶ PriceSeries ──▶ simple_returns ──▶ trailing_volatility ─┐
//!              │                                                   ├──▶ ScoreBreakdown ──▶ Signal
//!              └── last two bars + TradingSnapshot ──▶ SnapshotSignals ┘
//! ```
//!
//! Nothing here fails: missing inputs blank individual fields, and symbols
//! with fewer than two bars are left out of the [`SignalSet`] and reported
//! as [`SkippedSymbol`]s.

mod returns;
mod score;
mod snapshot;
mod volatility;

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

pub use returns::simple_returns;
pub use score::{ScoreBreakdown, ScoreInputs};
pub use snapshot::SnapshotSignals;
pub use volatility::trailing_volatility;

use crate::config::EngineConfig;
use crate::{
    Bar, FundamentalsSnapshot, PriceSeries, Signal, SignalSet, Symbol, UtcDateTime,
    ValidationError,
};

/// Fewest bars a symbol needs before it gets a signal.
pub const MIN_BARS: usize = 2;

impl From<&Signal> for ScoreInputs {
    fn from(signal: &Signal) -> Self {
        Self {
            gap_pct: signal.gap_pct,
            day_range_pct: signal.day_range_pct,
            volume_ratio: signal.volume_ratio,
            vol_10d: signal.vol_10d,
        }
    }
}

/// A symbol left out of the signal set because it had too few bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSymbol {
    pub symbol: Symbol,
    pub bar_count: usize,
}

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRun {
    pub signals: SignalSet,
    pub skipped: Vec<SkippedSymbol>,
}

#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    config: EngineConfig,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Signals for every symbol in `prices` that has at least two bars.
    pub fn compute(
        &self,
        prices: &BTreeMap<Symbol, Vec<Bar>>,
        fundamentals: &BTreeMap<Symbol, FundamentalsSnapshot>,
    ) -> SignalSet {
        self.run(prices, fundamentals).signals
    }

    /// Like [`compute`](Self::compute), also reporting which symbols were
    /// skipped. Symbols are processed in parallel; output order is by symbol.
    pub fn run(
        &self,
        prices: &BTreeMap<Symbol, Vec<Bar>>,
        fundamentals: &BTreeMap<Symbol, FundamentalsSnapshot>,
    ) -> SignalRun {
        let outcomes = prices
            .par_iter()
            .map(|(symbol, bars)| {
                let series = self.series_for(symbol, bars);
                match self.compute_series(symbol, &series, fundamentals.get(symbol)) {
                    Some(signal) => Ok(signal),
                    None => Err(SkippedSymbol {
                        symbol: symbol.clone(),
                        bar_count: series.len(),
                    }),
                }
            })
            .collect::<Vec<_>>();

        let mut signals = BTreeMap::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(signal) => {
                    signals.insert(signal.symbol.clone(), signal);
                }
                Err(skip) => {
                    debug!(
                        symbol = %skip.symbol,
                        bar_count = skip.bar_count,
                        "skipping symbol with too few bars"
                    );
                    skipped.push(skip);
                }
            }
        }

        info!(
            emitted = signals.len(),
            skipped = skipped.len(),
            "computed signals"
        );

        SignalRun {
            signals: SignalSet::new(UtcDateTime::now(), signals),
            skipped,
        }
    }

    /// Signal for one symbol, or `None` when it has fewer than two bars.
    /// Missing fundamentals count as an empty snapshot.
    pub fn compute_symbol(
        &self,
        symbol: &Symbol,
        bars: &[Bar],
        fundamentals: Option<&FundamentalsSnapshot>,
    ) -> Option<Signal> {
        let series = self.series_for(symbol, bars);
        self.compute_series(symbol, &series, fundamentals)
    }

    fn series_for(&self, symbol: &Symbol, bars: &[Bar]) -> PriceSeries {
        let series = PriceSeries::new(bars.to_vec());
        let dropped = bars.len() - series.len();
        if dropped > 0 {
            debug!(%symbol, dropped, "dropped bars with duplicate dates");
        }
        series
    }

    fn compute_series(
        &self,
        symbol: &Symbol,
        series: &PriceSeries,
        fundamentals: Option<&FundamentalsSnapshot>,
    ) -> Option<Signal> {
        if series.len() < MIN_BARS {
            return None;
        }
        let (prev, last) = series.last_two()?;

        let trading = fundamentals.map(FundamentalsSnapshot::trading).unwrap_or_default();
        let mixed = SnapshotSignals::compute(prev, last, &trading);

        let returns = simple_returns(&series.closes());
        let vol_10d = trailing_volatility(&returns, self.config.volatility_window);

        let inputs = ScoreInputs {
            gap_pct: mixed.gap_pct,
            day_range_pct: mixed.day_range_pct,
            volume_ratio: mixed.volume_ratio,
            vol_10d,
        };
        let score = ScoreBreakdown::compute(&inputs, &self.config.weights);

        Some(Signal {
            symbol: symbol.clone(),
            close_return_1d: mixed.close_return_1d,
            gap_pct: mixed.gap_pct,
            day_range_pct: mixed.day_range_pct,
            volume_ratio: mixed.volume_ratio,
            vol_10d,
            in_play_score: score.total(),
        })
    }
}
