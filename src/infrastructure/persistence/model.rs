use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::verification::{RepositoryError, Verification, VerificationId};

// ============================================================================
// Verification Storage Model
// ============================================================================
//
// Flat row shape of the `verifications` table. The aggregate keeps its value
// objects private, so storage adapters go through this struct in both
// directions.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct VerificationRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub kind: String,
    pub description: String,
    pub status: String,
    pub decline_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub version: i64,
}

impl VerificationRecord {
    /// Flatten an aggregate. `id` is 0 for aggregates not yet persisted.
    pub fn from_domain(verification: &Verification) -> Self {
        Self {
            id: verification.id().map_or(0, |id| id.value()),
            uuid: verification.uuid().as_uuid(),
            kind: verification.kind().as_str().to_string(),
            description: verification.description().as_str().to_string(),
            status: verification.status().as_str().to_string(),
            decline_reason: verification.decline_reason().map(|r| r.as_str().to_string()),
            created_at: verification.created_at(),
            version: verification.version(),
        }
    }

    /// Rebuild the aggregate, re-running every value object check
    pub fn into_domain(self) -> Result<Verification, RepositoryError> {
        let uuid = self.uuid;
        // Empty reasons written by older rows count as absent
        let decline_reason = self.decline_reason.as_deref().filter(|r| !r.is_empty());

        Verification::create(&uuid.to_string(), &self.kind, &self.description)
            .and_then(|verification| {
                verification.reconstitute(
                    VerificationId::new(self.id),
                    &self.status,
                    decline_reason,
                    self.created_at,
                    self.version,
                )
            })
            .map_err(|e| RepositoryError::Corrupted(format!("{uuid}: {e}")))
    }
}
