use serde::{Deserialize, Serialize};

use crate::config::ScoreWeights;

/// Inputs to the in-play score. Any of them may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreInputs {
    pub gap_pct: Option<f64>,
    pub day_range_pct: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub vol_10d: Option<f64>,
}

/// Per-component contributions to the in-play score.
///
/// Every component lies in `[0, cap]`; unknown inputs contribute zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub gap: f64,
    pub range: f64,
    pub volume: f64,
    pub volatility: f64,
}

impl ScoreBreakdown {
    pub fn compute(inputs: &ScoreInputs, weights: &ScoreWeights) -> Self {
        Self {
            gap: contribution(
                inputs.gap_pct.map(f64::abs),
                weights.gap_multiplier,
                weights.gap_cap,
            ),
            range: contribution(
                inputs.day_range_pct,
                weights.range_multiplier,
                weights.range_cap,
            ),
            // Only volume above the 10-day average counts.
            volume: contribution(
                inputs.volume_ratio.map(|ratio| (ratio - 1.0).max(0.0)),
                weights.volume_multiplier,
                weights.volume_cap,
            ),
            volatility: contribution(
                inputs.vol_10d,
                weights.volatility_multiplier,
                weights.volatility_cap,
            ),
        }
    }

    pub fn total(&self) -> f64 {
        self.gap + self.range + self.volume + self.volatility
    }
}

fn contribution(value: Option<f64>, multiplier: f64, cap: f64) -> f64 {
    match value.map(|value| value * multiplier) {
        Some(scaled) if !scaled.is_nan() => scaled.clamp(0.0, cap),
        _ => 0.0,
    }
}
