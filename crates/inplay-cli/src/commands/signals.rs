use std::fs;
use std::path::{Path, PathBuf};

use inplay_core::{DataPaths, SignalEngine, SignalSet};
use tracing::info;

use crate::cli::SignalsArgs;
use crate::error::CliError;

use super::inputs;
use super::CommandResult;

pub fn run(
    args: &SignalsArgs,
    engine: &SignalEngine,
    paths: &DataPaths,
) -> Result<CommandResult, CliError> {
    let mut loaded = inputs::load(&args.input, paths)?;
    let run = engine.run(&loaded.prices, &loaded.fundamentals);
    loaded.warn_skipped(&run.skipped);

    if let Some(out) = report_path(args, paths) {
        write_report(&run.signals, &out)?;
        info!(path = %out.display(), symbols = run.signals.len(), "saved signals report");
    }

    Ok(CommandResult::ok(serde_json::to_value(&run.signals)?)
        .with_warnings(loaded.warnings)
        .with_errors(loaded.errors))
}

fn report_path(args: &SignalsArgs, paths: &DataPaths) -> Option<PathBuf> {
    match (&args.out, args.save) {
        (Some(out), _) => Some(out.clone()),
        (None, true) => Some(paths.signals.clone()),
        (None, false) => None,
    }
}

/// Writes the bare report (no envelope), creating parent directories.
fn write_report(signals: &SignalSet, path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let payload = serde_json::to_string_pretty(signals)?;
    fs::write(path, payload)?;
    Ok(())
}
