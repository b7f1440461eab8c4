mod config;
mod inputs;
mod rank;
mod signals;

use inplay_core::{DataPaths, EngineConfig, Envelope, EnvelopeError, SignalEngine};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Invocation;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let invocation = Invocation::start();
    let paths = DataPaths::default();
    let config = load_engine_config(cli)?;

    let command_result = match &cli.command {
        Command::Signals(args) => signals::run(args, &SignalEngine::new(config)?, &paths)?,
        Command::Rank(args) => rank::run(args, &SignalEngine::new(config)?, &paths)?,
        Command::Config => config::run(&config, &paths)?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
    } = command_result;

    debug!(request_id = %invocation.request_id(), "command finished");
    Ok(Envelope::new(invocation.finish(warnings), data).with_errors(errors))
}

fn load_engine_config(cli: &Cli) -> Result<EngineConfig, CliError> {
    match &cli.config {
        Some(path) => Ok(EngineConfig::from_path(path)?),
        None => Ok(EngineConfig::default()),
    }
}
