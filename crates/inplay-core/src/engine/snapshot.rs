use crate::{Bar, TradingSnapshot};

/// Signals that mix the last two bars with today's trading snapshot.
///
/// Each field is computed independently; a missing input only blanks the
/// field that needs it. Non-finite snapshot values (`NaN` cells from the
/// loader) count as missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapshotSignals {
    pub close_return_1d: Option<f64>,
    pub gap_pct: Option<f64>,
    pub day_range_pct: Option<f64>,
    pub volume_ratio: Option<f64>,
}

impl SnapshotSignals {
    pub fn compute(prev: &Bar, last: &Bar, trading: &TradingSnapshot) -> Self {
        let prev_close = prev.usable_close();
        let open = finite(trading.open);

        Self {
            close_return_1d: close_return(prev_close, last.usable_close()),
            gap_pct: gap(open, finite(trading.previous_close).or(prev_close)),
            day_range_pct: day_range(open, finite(trading.day_high), finite(trading.day_low)),
            volume_ratio: ratio(finite(trading.volume), finite(trading.avg_volume_10d)),
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

fn close_return(prev_close: Option<f64>, last_close: Option<f64>) -> Option<f64> {
    ratio(last_close, prev_close).map(|growth| growth - 1.0)
}

/// Gap against the snapshot's previous close, or the prior bar's close when
/// the snapshot has none.
fn gap(today_open: Option<f64>, base_close: Option<f64>) -> Option<f64> {
    ratio(today_open, base_close).map(|growth| growth - 1.0)
}

fn day_range(open: Option<f64>, high: Option<f64>, low: Option<f64>) -> Option<f64> {
    let (open, high, low) = (open?, high?, low?);
    ratio(Some(high - low), Some(open))
}

/// `numerator / denominator` when both are present and the denominator is
/// non-zero. Zero numerators are valid.
fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(numerator), Some(denominator)) if denominator != 0.0 => {
            Some(numerator / denominator)
        }
        _ => None,
    }
}
