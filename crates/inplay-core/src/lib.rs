//! # Inplay Core
//!
//! Day-trading signal engine for daily price history and trading snapshots.
//!
//! ## Overview
//!
//! Given per-symbol OHLCV bars and a fundamentals record carrying today's
//! trading snapshot, the engine derives:
//!
//! | Signal | Definition |
//! |--------|------------|
//! | `close_return_1d` | `last.close / prev.close - 1` |
//! | `gap_pct` | `today_open / previous_close - 1` |
//! | `day_range_pct` | `(today_high - today_low) / today_open` |
//! | `volume_ratio` | `today_volume / avg_volume_10d` |
//! | `vol_10d` | sample std-dev of the last 10 daily returns |
//! | `in_play_score` | capped sum of the above, `0..=150` with default weights |
//!
//! Every signal except the score is optional: a missing input or a zero
//! denominator leaves that one field empty. Symbols with fewer than two bars
//! are left out entirely.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Engine weights, volatility window, data paths |
//! | [`domain`] | Symbol, Bar, PriceSeries, fundamentals, Signal, SignalSet |
//! | [`engine`] | Return calculator, snapshot mixer, volatility, scorer, aggregator |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`input`] | Loader JSON file boundary |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use inplay_core::{FundamentalsInput, PriceInput, SignalEngine};
//!
//! let prices = PriceInput::load(Path::new("data/prices-sample.json"))?;
//! let fundamentals = FundamentalsInput::load(Path::new("data/fundamentals-slim.json"))?;
//!
//! let signals = SignalEngine::default().compute(&prices.prices, &fundamentals.fundamentals);
//! for signal in signals.ranked() {
//!     println!("{} {:.2}", signal.symbol, signal.in_play_score);
//! }
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod input;

pub use config::{DataPaths, EngineConfig, ScoreWeights};
pub use domain::{
    Bar, BarDate, FundamentalsSnapshot, PriceSeries, Signal, SignalSet, Symbol, TradingSnapshot,
    UtcDateTime,
};
pub use engine::{
    simple_returns, trailing_volatility, ScoreBreakdown, ScoreInputs, SignalEngine, SignalRun,
    SkippedSymbol, SnapshotSignals, MIN_BARS,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, ErrorCode, SCHEMA_VERSION};
pub use error::{CoreError, ValidationError};
pub use input::{FundamentalsInput, PriceInput, RejectReason, RejectedKey};
