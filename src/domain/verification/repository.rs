use async_trait::async_trait;

use crate::context::{DispatchContext, Interrupted};

use super::aggregate::Verification;
use super::value_objects::{VerificationId, VerificationUuid};

// ============================================================================
// Verification Repository Contract
// ============================================================================
//
// The only channel between the domain and storage. Implementations live in
// infrastructure::persistence.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("error trying to persist verification to database: {0}")]
    PersistFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("verification not found: {0}")]
    NotFound(VerificationUuid),

    #[error("verification {0} was modified concurrently")]
    ConcurrencyConflict(VerificationUuid),

    #[error("failed restoring verification from database: {0}")]
    Corrupted(String),

    #[error("storage operation cancelled")]
    Cancelled,

    #[error("storage deadline exceeded")]
    DeadlineExceeded,
}

impl RepositoryError {
    pub fn persist_failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RepositoryError::PersistFailed(Box::new(error))
    }
}

impl From<Interrupted> for RepositoryError {
    fn from(value: Interrupted) -> Self {
        match value {
            Interrupted::Cancelled => RepositoryError::Cancelled,
            Interrupted::DeadlineExceeded => RepositoryError::DeadlineExceeded,
        }
    }
}

#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Persist a brand-new verification and return its storage id
    async fn add(
        &self,
        ctx: &DispatchContext,
        verification: &Verification,
    ) -> Result<VerificationId, RepositoryError>;

    /// Persist the mutated state of an existing verification.
    ///
    /// Fails with `ConcurrencyConflict` if the stored version moved since
    /// `verification` was loaded.
    async fn update(
        &self,
        ctx: &DispatchContext,
        verification: &Verification,
    ) -> Result<(), RepositoryError>;

    async fn get_by_uuid(
        &self,
        ctx: &DispatchContext,
        uuid: VerificationUuid,
    ) -> Result<Verification, RepositoryError>;
}
