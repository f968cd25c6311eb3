//! Signal-subsystem error type.
//!
//! Every input error names the offending step, user and tower so a broken
//! measurement file can be fixed without guesswork.

use cs_core::{Step, TowerId, UserId};
use thiserror::Error;

/// Errors produced by `cs-signal`.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("RSSI buffer holds {got} values but {steps}×{users}×{towers} = {expected} were expected")]
    LengthMismatch {
        steps:    usize,
        users:    usize,
        towers:   usize,
        expected: usize,
        got:      usize,
    },

    #[error("snapshot {step}: {what} count {got} does not match expected {expected}")]
    ShapeMismatch {
        step:     Step,
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("snapshot {step}, {user}: row has {got} towers, expected {expected}")]
    RaggedRow {
        step:     Step,
        user:     UserId,
        expected: usize,
        got:      usize,
    },

    #[error("non-finite RSSI {value} at {step}, {user}, {tower}")]
    NonFinite {
        step:  Step,
        user:  UserId,
        tower: TowerId,
        value: f64,
    },

    #[error("{step} is out of range (series has {steps} steps)")]
    StepOutOfRange { step: Step, steps: usize },

    #[error("missing RSSI sample at {step}, {user}, {tower}")]
    MissingSample { step: Step, user: UserId, tower: TowerId },

    #[error("duplicate RSSI sample at {step}, {user}, {tower}")]
    DuplicateSample { step: Step, user: UserId, tower: TowerId },

    #[error("measurement shape {steps}×{users}×{towers} is too large to index")]
    ShapeOverflow { steps: usize, users: usize, towers: usize },

    #[error("invalid path-loss parameter {name}: {reason}")]
    InvalidModel { name: &'static str, reason: String },

    #[error("tower layout is empty")]
    NoTowers,

    #[error("measurement parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SignalResult<T> = Result<T, SignalError>;
