use thiserror::Error;

/// Errors raised by the metrics engine.
///
/// Everything else in the engine is total over well-formed input: missing
/// optional timestamps surface as `None`/null values, never as errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// Caller-supplied parameters are missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The sample sets cannot drive a forecast (e.g. no cycle times).
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A trial kept drawing samples without burning the backlog down.
    #[error("simulation stalled: {remaining} items still open after {days} simulated days")]
    StalledSimulation { remaining: f64, days: u32 },

    /// The cancellation flag was raised between trials.
    #[error("simulation cancelled after {completed} of {requested} trials")]
    Cancelled { completed: usize, requested: usize },
}

impl FlowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }
}

pub type Result<T, E = FlowError> = std::result::Result<T, E>;
