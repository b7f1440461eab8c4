use std::collections::BTreeMap;

use inplay_core::{
    Bar, DataPaths, EnvelopeError, FundamentalsInput, FundamentalsSnapshot, PriceInput,
    RejectedKey, SkippedSymbol, Symbol,
};
use tracing::info;

use crate::cli::InputArgs;
use crate::error::CliError;

const DAILY: &str = "1d";

/// Parsed input files plus the diagnostics they produced.
pub struct LoadedInputs {
    pub prices: BTreeMap<Symbol, Vec<Bar>>,
    pub fundamentals: BTreeMap<Symbol, FundamentalsSnapshot>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl LoadedInputs {
    pub fn warn_skipped(&mut self, skipped: &[SkippedSymbol]) {
        for skip in skipped {
            self.warnings.push(format!(
                "skipped {}: {} bar(s), need at least {}",
                skip.symbol,
                skip.bar_count,
                inplay_core::MIN_BARS
            ));
        }
    }
}

/// Loads prices and fundamentals.
///
/// An explicitly requested file must exist. The default fundamentals file is
/// optional: without it every symbol gets an empty trading snapshot.
pub fn load(args: &InputArgs, paths: &DataPaths) -> Result<LoadedInputs, CliError> {
    let prices_path = args.prices.as_ref().unwrap_or(&paths.prices);
    let prices = PriceInput::load(prices_path)?;

    let mut warnings = Vec::new();
    if let Some(interval) = prices.interval.as_deref().filter(|interval| *interval != DAILY) {
        warnings.push(format!(
            "prices interval is '{interval}', not '{DAILY}'; signals treat each bar as one day"
        ));
    }
    for (symbol, dropped) in &prices.undated {
        warnings.push(format!("{symbol}: dropped {dropped} price row(s) without a date"));
    }
    let mut errors = rejected_errors("prices", &prices.rejected);

    let fundamentals = match &args.fundamentals {
        Some(path) => FundamentalsInput::load(path)?,
        None if paths.fundamentals.is_file() => FundamentalsInput::load(&paths.fundamentals)?,
        None => {
            warnings.push(format!(
                "fundamentals file '{}' not found; gap, range and volume signals are empty",
                paths.fundamentals.display()
            ));
            FundamentalsInput {
                fundamentals: BTreeMap::new(),
                rejected: Vec::new(),
            }
        }
    };
    errors.extend(rejected_errors("fundamentals", &fundamentals.rejected));

    info!(
        prices = prices.prices.len(),
        fundamentals = fundamentals.fundamentals.len(),
        path = %prices_path.display(),
        "loaded inputs"
    );

    Ok(LoadedInputs {
        prices: prices.prices,
        fundamentals: fundamentals.fundamentals,
        warnings,
        errors,
    })
}

fn rejected_errors(file: &str, rejected: &[RejectedKey]) -> Vec<EnvelopeError> {
    rejected
        .iter()
        .map(|rejection| EnvelopeError::rejected_key(file, rejection))
        .collect()
}
