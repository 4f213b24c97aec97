use thiserror::Error;

/// Setup-time failures. Nothing here is raised once a run has started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdexError {
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("invalid parameter {name}: {reason} (got {value})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(&'static str),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}

pub type AdexResult<T, E = AdexError> = core::result::Result<T, E>;
