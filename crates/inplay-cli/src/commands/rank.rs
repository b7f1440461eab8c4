use inplay_core::{
    DataPaths, ScoreBreakdown, ScoreInputs, Signal, SignalEngine, SignalSet, UtcDateTime,
};
use serde::Serialize;

use crate::cli::RankArgs;
use crate::error::CliError;

use super::inputs;
use super::CommandResult;

#[derive(Debug, Serialize)]
struct RankedSignal<'a> {
    rank: usize,
    #[serde(flatten)]
    signal: &'a Signal,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Serialize)]
struct RankResponseData<'a> {
    generated_at: UtcDateTime,
    total: usize,
    ranked: Vec<RankedSignal<'a>>,
}

pub fn run(
    args: &RankArgs,
    engine: &SignalEngine,
    paths: &DataPaths,
) -> Result<CommandResult, CliError> {
    if args.top == 0 {
        return Err(CliError::Command(String::from(
            "--top must be greater than zero",
        )));
    }

    let mut loaded = inputs::load(&args.input, paths)?;
    let run = engine.run(&loaded.prices, &loaded.fundamentals);
    loaded.warn_skipped(&run.skipped);

    let data = serde_json::to_value(rank(&run.signals, engine, args.top, args.breakdown))?;
    Ok(CommandResult::ok(data)
        .with_warnings(loaded.warnings)
        .with_errors(loaded.errors))
}

fn rank<'a>(
    signals: &'a SignalSet,
    engine: &SignalEngine,
    top: usize,
    with_breakdown: bool,
) -> RankResponseData<'a> {
    let weights = engine.config().weights;
    let ranked = signals
        .ranked()
        .into_iter()
        .take(top)
        .enumerate()
        .map(|(index, signal)| RankedSignal {
            rank: index + 1,
            signal,
            breakdown: with_breakdown
                .then(|| ScoreBreakdown::compute(&ScoreInputs::from(signal), &weights)),
        })
        .collect();

    RankResponseData {
        generated_at: signals.generated_at,
        total: signals.len(),
        ranked,
    }
}
