use crate::domain::verification::{RepositoryError, VerificationError};

// ============================================================================
// Bus Errors
// ============================================================================

/// Everything a dispatch can fail with. Handler errors pass through verbatim.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("{0}: handler not found")]
    HandlerNotFound(String),

    #[error("{0}: unexpected message")]
    UnexpectedMessage(String),

    #[error(transparent)]
    Domain(#[from] VerificationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BusError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            BusError::HandlerNotFound(_) => "handler_not_found",
            BusError::UnexpectedMessage(_) => "unexpected_message",
            BusError::Domain(VerificationError::AlreadyProcessed) => "already_processed",
            BusError::Domain(_) => "validation",
            BusError::Repository(RepositoryError::NotFound(_)) => "not_found",
            BusError::Repository(RepositoryError::ConcurrencyConflict(_)) => "conflict",
            BusError::Repository(RepositoryError::Cancelled) => "cancelled",
            BusError::Repository(RepositoryError::DeadlineExceeded) => "deadline_exceeded",
            BusError::Repository(_) => "persistence",
        }
    }
}
