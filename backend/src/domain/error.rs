//! Error type shared by all domain services.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Input that can never be valid, e.g. month 13 or day 32
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing, unknown or expired login token / session
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failure reported by the persistence layer
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    /// The login link could not be sent
    #[error("delivery error: {0}")]
    Delivery(anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
