// ============================================================================
// Verification Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("invalid verification uuid: {0}")]
    InvalidIdentifier(String),

    #[error("invalid verification kind: {0}")]
    InvalidKind(String),

    #[error("verification description must not be empty")]
    EmptyDescription,

    #[error("invalid verification status: {0}")]
    InvalidStatus(String),

    #[error("verification decline reason must not be empty")]
    EmptyDeclineReason,

    #[error("verification is already processed")]
    AlreadyProcessed,
}
