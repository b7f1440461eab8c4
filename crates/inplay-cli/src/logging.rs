use tracing_subscriber::EnvFilter;

use crate::error::CliError;

const LOG_ENV: &str = "INPLAY_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs the stderr subscriber. stdout is reserved for envelopes.
pub fn init(level: Option<&str>) -> Result<(), CliError> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive).map_err(|error| {
            CliError::Command(format!("invalid --log-level '{directive}': {error}"))
        })?,
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| CliError::Command(format!("failed to initialize logging: {error}")))
}
