use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] inplay_core::ValidationError),

    #[error(transparent)]
    Core(#[from] inplay_core::CoreError),

    #[error("command error: {0}")]
    Command(String),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Core(inplay_core::CoreError::Validation(_)) => 2,
            Self::Core(
                inplay_core::CoreError::Serialization(_) | inplay_core::CoreError::Snapshot(_),
            )
            | Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Core(inplay_core::CoreError::Io { .. }) | Self::Io(_) => 10,
        }
    }
}
