use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::context::DispatchContext;
use crate::domain::verification::{
    RepositoryError, Verification, VerificationId, VerificationRepository, VerificationUuid,
};

use super::model::VerificationRecord;

// ============================================================================
// In-Memory Verification Repository
// ============================================================================
//
// Same contract as the PostgreSQL adapter, including sequential ids and the
// optimistic version check. Used by tests and `--storage memory`.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
#[error("verification {0} already exists")]
pub struct DuplicateVerification(pub VerificationUuid);

#[derive(Default)]
struct State {
    rows: HashMap<Uuid, VerificationRecord>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryVerificationRepository {
    state: RwLock<State>,
}

impl InMemoryVerificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn add(
        &self,
        ctx: &DispatchContext,
        verification: &Verification,
    ) -> Result<VerificationId, RepositoryError> {
        let mut state = ctx.run(self.state.write()).await?;
        let uuid = verification.uuid();

        if state.rows.contains_key(&uuid.as_uuid()) {
            return Err(RepositoryError::persist_failed(DuplicateVerification(uuid)));
        }

        state.last_id += 1;
        let mut record = VerificationRecord::from_domain(verification);
        record.id = state.last_id;
        record.version = 0;
        state.rows.insert(record.uuid, record);

        Ok(VerificationId::new(state.last_id))
    }

    async fn update(
        &self,
        ctx: &DispatchContext,
        verification: &Verification,
    ) -> Result<(), RepositoryError> {
        let mut state = ctx.run(self.state.write()).await?;
        let uuid = verification.uuid();

        let stored = state
            .rows
            .get_mut(&uuid.as_uuid())
            .ok_or(RepositoryError::NotFound(uuid))?;

        if stored.version != verification.version() {
            return Err(RepositoryError::ConcurrencyConflict(uuid));
        }

        stored.status = verification.status().as_str().to_string();
        stored.decline_reason = verification.decline_reason().map(|r| r.as_str().to_string());
        stored.version += 1;

        Ok(())
    }

    async fn get_by_uuid(
        &self,
        ctx: &DispatchContext,
        uuid: VerificationUuid,
    ) -> Result<Verification, RepositoryError> {
        let state = ctx.run(self.state.read()).await?;

        state
            .rows
            .get(&uuid.as_uuid())
            .cloned()
            .ok_or(RepositoryError::NotFound(uuid))?
            .into_domain()
    }
}
