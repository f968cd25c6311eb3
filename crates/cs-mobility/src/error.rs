use cs_core::UserId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("invalid mobility parameter {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },

    #[error("noise distribution rejected: {0}")]
    Distribution(String),

    #[error("user {0} is outside the population")]
    UnknownUser(UserId),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
