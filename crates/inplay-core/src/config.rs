//! Engine tuning and data-directory resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CoreError, ValidationError};

pub const DEFAULT_VOLATILITY_WINDOW: usize = 10;
pub const MIN_VOLATILITY_WINDOW: usize = 2;

const PRICES_FILE: &str = "prices-sample.json";
const FUNDAMENTALS_FILE: &str = "fundamentals-slim.json";
const SIGNALS_FILE: &str = "signals-today.json";

/// Multipliers and caps for the in-play score components.
///
/// Each component is `clamp(input * multiplier, 0, cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub gap_multiplier: f64,
    pub gap_cap: f64,
    pub range_multiplier: f64,
    pub range_cap: f64,
    pub volume_multiplier: f64,
    pub volume_cap: f64,
    pub volatility_multiplier: f64,
    pub volatility_cap: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            gap_multiplier: 100.0,
            gap_cap: 50.0,
            range_multiplier: 100.0,
            range_cap: 30.0,
            volume_multiplier: 10.0,
            volume_cap: 40.0,
            volatility_multiplier: 100.0,
            volatility_cap: 30.0,
        }
    }
}

impl ScoreWeights {
    pub fn max_score(&self) -> f64 {
        self.gap_cap + self.range_cap + self.volume_cap + self.volatility_cap
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("gap_multiplier", self.gap_multiplier),
            ("gap_cap", self.gap_cap),
            ("range_multiplier", self.range_multiplier),
            ("range_cap", self.range_cap),
            ("volume_multiplier", self.volume_multiplier),
            ("volume_cap", self.volume_cap),
            ("volatility_multiplier", self.volatility_multiplier),
            ("volatility_cap", self.volatility_cap),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidScoreWeight { field });
            }
        }

        Ok(())
    }
}

/// Engine configuration. Missing keys in a config file take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of most recent returns used for the volatility estimate.
    pub volatility_window: usize,
    pub weights: ScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
            weights: ScoreWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.volatility_window < MIN_VOLATILITY_WINDOW {
            return Err(ValidationError::VolatilityWindowTooSmall {
                value: self.volatility_window,
                min: MIN_VOLATILITY_WINDOW,
            });
        }
        self.weights.validate()
    }

    /// Load and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let content = fs::read_to_string(path).map_err(|source| CoreError::io(path, source))?;
        let config = serde_json::from_str::<Self>(&content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Locations of the loader's snapshot files and the signals report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPaths {
    pub home: PathBuf,
    pub prices: PathBuf,
    pub fundamentals: PathBuf,
    pub signals: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::under(resolve_inplay_home())
    }
}

impl DataPaths {
    pub fn under(home: PathBuf) -> Self {
        let data_dir = home.join("data");
        Self {
            prices: data_dir.join(PRICES_FILE),
            fundamentals: data_dir.join(FUNDAMENTALS_FILE),
            signals: data_dir.join(SIGNALS_FILE),
            home,
        }
    }
}

fn resolve_inplay_home() -> PathBuf {
    if let Some(path) = env::var_os("INPLAY_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".inplay");
    }

    PathBuf::from(".inplay")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_150() {
        assert_eq!(ScoreWeights::default().max_score(), 150.0);
    }

    #[test]
    fn default_config_is_valid() {
        EngineConfig::default().validate().expect("defaults are valid");
    }

    #[test]
    fn rejects_window_below_two() {
        let config = EngineConfig {
            volatility_window: 1,
            ..EngineConfig::default()
        };
        let err = config.validate().expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::VolatilityWindowTooSmall { value: 1, min: 2 }
        ));
    }

    #[test]
    fn rejects_negative_cap() {
        let config = EngineConfig {
            weights: ScoreWeights {
                range_cap: -1.0,
                ..ScoreWeights::default()
            },
            ..EngineConfig::default()
        };
        let err = config.validate().expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidScoreWeight { field: "range_cap" });
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("engine.json");
        fs::write(&path, r#"{"volatility_window": 20, "weights": {"gap_cap": 25.0}}"#)
            .expect("write config");

        let config = EngineConfig::from_path(&path).expect("config loads");
        assert_eq!(config.volatility_window, 20);
        assert_eq!(config.weights.gap_cap, 25.0);
        assert_eq!(config.weights.volume_cap, 40.0);
    }

    #[test]
    fn missing_file_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("absent.json");
        let err = EngineConfig::from_path(&path).expect_err("must fail");
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn data_paths_live_under_data_dir() {
        let paths = DataPaths::under(PathBuf::from("/srv/inplay"));
        assert_eq!(
            paths.prices,
            PathBuf::from("/srv/inplay/data/prices-sample.json")
        );
        assert_eq!(
            paths.signals,
            PathBuf::from("/srv/inplay/data/signals-today.json")
        );
    }
}
