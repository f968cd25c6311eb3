//! Core error type.
//!
//! Configuration problems are detected here, at construction time, before a
//! run starts.  Sub-crates wrap `CoreError` as one variant of their own enum.

use thiserror::Error;

/// The top-level error type for `cs-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("time-to-trigger must be at least 1 step (got {0})")]
    ZeroTimeToTrigger(u32),

    #[error("{name} must be finite (got {value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("capacity list has {got} entries but the network has {expected} towers")]
    CapacityCountMismatch { expected: usize, got: usize },

    #[error("the network must contain at least one tower")]
    NoTowers,
}

/// Shorthand result type for `cs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
