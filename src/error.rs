use thiserror::Error;

/// Crate-level error, the common target all module errors convert into
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Readiness error: {0}")]
    ReadinessError(String),
    #[error("Persistence error: {0}")]
    PersistenceError(String),
    #[error("Publish error: {0}")]
    PublishError(String),
    #[error("State machine error: {0}")]
    StateMachineError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type Result<T> = std::result::Result<T, DraftError>;
