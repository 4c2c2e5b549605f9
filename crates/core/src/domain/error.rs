// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Invalid thresholds: warning={warning}, critical={critical} (need 0 < warning < critical < 1)")]
    InvalidThresholds { warning: f64, critical: f64 },

    #[error("Invalid sampling interval: must be greater than zero")]
    InvalidInterval,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
