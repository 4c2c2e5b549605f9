// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Only construction and wiring can fail. Once a monitor is running, every
/// per-cycle failure is absorbed and logged instead of surfacing here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
