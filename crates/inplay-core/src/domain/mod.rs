//! # Domain Models
//!
//! Canonical value types consumed and produced by the signal engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker |
//! | [`Bar`] | Daily OHLCV row as written by the loader |
//! | [`PriceSeries`] | Sorted, de-duplicated bars for one symbol |
//! | [`FundamentalsSnapshot`] | Fundamentals record with optional [`TradingSnapshot`] |
//! | [`Signal`] | Derived signals for one symbol |
//! | [`SignalSet`] | Signals for one run, keyed by symbol |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! All types are immutable once built; nothing is shared between symbols.

mod bar;
mod fundamentals;
mod signal;
mod symbol;
mod timestamp;

pub use bar::{Bar, BarDate, PriceSeries};
pub use fundamentals::{FundamentalsSnapshot, TradingSnapshot};
pub use signal::{Signal, SignalSet};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
