use inplay_core::{DataPaths, EngineConfig};
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ConfigResponseData<'a> {
    engine: &'a EngineConfig,
    max_score: f64,
    paths: &'a DataPaths,
}

pub fn run(config: &EngineConfig, paths: &DataPaths) -> Result<CommandResult, CliError> {
    let data = ConfigResponseData {
        engine: config,
        max_score: config.weights.max_score(),
        paths,
    };
    Ok(CommandResult::ok(serde_json::to_value(data)?))
}
