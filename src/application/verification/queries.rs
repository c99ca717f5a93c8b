use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::bus::{BusError, Query, QueryHandler};
use crate::context::DispatchContext;
use crate::domain::verification::{Verification, VerificationRepository, VerificationUuid};

// ============================================================================
// Verification Queries
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationQueryType {
    GetByUuid,
}

impl VerificationQueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationQueryType::GetByUuid => "get_by_uuid.verification.query",
        }
    }
}

impl fmt::Display for VerificationQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct GetVerificationByUuid {
    pub uuid: String,
}

#[derive(Debug, Clone)]
pub enum VerificationQuery {
    GetByUuid(GetVerificationByUuid),
}

impl Query for VerificationQuery {
    type Type = VerificationQueryType;
    type Response = Verification;

    fn query_type(&self) -> Self::Type {
        match self {
            VerificationQuery::GetByUuid(_) => VerificationQueryType::GetByUuid,
        }
    }
}

impl From<GetVerificationByUuid> for VerificationQuery {
    fn from(value: GetVerificationByUuid) -> Self {
        VerificationQuery::GetByUuid(value)
    }
}

pub struct GetVerificationByUuidHandler {
    repository: Arc<dyn VerificationRepository>,
}

impl GetVerificationByUuidHandler {
    pub fn new(repository: Arc<dyn VerificationRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl QueryHandler<VerificationQuery> for GetVerificationByUuidHandler {
    async fn handle(&self, ctx: &DispatchContext, query: VerificationQuery) -> Result<Verification, BusError> {
        // Irrefutable while GetByUuid is the only query; a new variant forces
        // an UnexpectedMessage arm here
        let VerificationQuery::GetByUuid(query) = query;

        let uuid = VerificationUuid::parse(&query.uuid)?;
        Ok(self.repository.get_by_uuid(ctx, uuid).await?)
    }
}
