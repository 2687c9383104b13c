use crate::error::DraftError;
use crate::models::{DraftId, ParentId};
use thiserror::Error;

/// The draft's remote identity could not be established
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadinessError {
    #[error("Draft lookup failed for parent {parent}: {reason}")]
    LookupFailed { parent: ParentId, reason: String },

    #[error("Lookup returned an unusable draft record: {reason}")]
    InvalidRecord { reason: String },

    #[error("Readiness resolution timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// The save of the draft failed remotely
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Save rejected: {reason}")]
    SaveRejected { reason: String },

    #[error("Draft {draft_id} no longer exists")]
    NotFound { draft_id: DraftId },

    #[error("Save timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Why a publish invocation ended in failure.
///
/// Used for diagnostics only; the caller's error callback is not told which
/// variant occurred.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error(transparent)]
    Readiness(#[from] ReadinessError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("A publish is already in flight for this draft")]
    AlreadyInFlight,
}

impl PublishError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Readiness(_) => "readiness",
            Self::Persistence(_) => "persistence",
            Self::AlreadyInFlight => "already_in_flight",
        }
    }
}

/// Comprehensive error types for state machine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    #[error("Invalid state transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for state machine operations
pub type StateMachineResult<T> = Result<T, StateMachineError>;
pub type ReadinessResult<T> = Result<T, ReadinessError>;
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Helper function to create lookup failures
pub fn lookup_failed(parent: ParentId, reason: impl Into<String>) -> ReadinessError {
    ReadinessError::LookupFailed {
        parent,
        reason: reason.into(),
    }
}

/// Helper function to create save rejections
pub fn save_rejected(reason: impl Into<String>) -> PersistenceError {
    PersistenceError::SaveRejected {
        reason: reason.into(),
    }
}

impl From<ReadinessError> for DraftError {
    fn from(err: ReadinessError) -> Self {
        DraftError::ReadinessError(format!("{err}"))
    }
}

impl From<PersistenceError> for DraftError {
    fn from(err: PersistenceError) -> Self {
        DraftError::PersistenceError(format!("{err}"))
    }
}

impl From<PublishError> for DraftError {
    fn from(err: PublishError) -> Self {
        DraftError::PublishError(format!("{err}"))
    }
}

impl From<StateMachineError> for DraftError {
    fn from(err: StateMachineError) -> Self {
        DraftError::StateMachineError(format!("{err}"))
    }
}
