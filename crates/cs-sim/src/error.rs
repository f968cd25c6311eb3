use cs_core::CoreError;
use cs_signal::SignalError;
use thiserror::Error;

/// Errors produced while building or running a [`Controller`][crate::Controller].
///
/// Either a run returns its complete [`MetricsSeries`][crate::MetricsSeries]
/// or one of these; partial results are never returned.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("input error: {0}")]
    Input(#[from] SignalError),

    #[error("invalid {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },
}

pub type SimResult<T> = Result<T, SimError>;
