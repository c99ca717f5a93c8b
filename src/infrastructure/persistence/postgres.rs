use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::time::Instant;

use crate::context::DispatchContext;
use crate::domain::verification::{
    RepositoryError, Verification, VerificationId, VerificationRepository, VerificationUuid,
};

use super::model::VerificationRecord;

// ============================================================================
// PostgreSQL Verification Repository
// ============================================================================
//
// Table: verifications (see migrations/). Every statement runs under the
// dispatch context narrowed by the configured database timeout.
//
// Updates are conditional on the version that was read:
//
//   UPDATE ... SET version = version + 1 WHERE uuid = $1 AND version = $4
//
// Zero affected rows means either the row is gone or someone else won.
//
// ============================================================================

pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

#[derive(Clone)]
pub struct PostgresVerificationRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresVerificationRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Run a statement bounded by both the caller's context and the db timeout
    async fn guarded<F, T>(&self, ctx: &DispatchContext, statement: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let ctx = ctx.clone().with_deadline(Instant::now() + self.timeout);

        ctx.run(statement).await?.map_err(|e| {
            tracing::warn!(error = %e, "Verification storage statement failed");
            RepositoryError::persist_failed(e)
        })
    }
}

#[async_trait]
impl VerificationRepository for PostgresVerificationRepository {
    async fn add(
        &self,
        ctx: &DispatchContext,
        verification: &Verification,
    ) -> Result<VerificationId, RepositoryError> {
        let record = VerificationRecord::from_domain(verification);

        let id = self
            .guarded(
                ctx,
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO verifications
                        (uuid, kind, description, status, decline_reason, created_at, version)
                    VALUES ($1, $2, $3, $4, $5, $6, 0)
                    RETURNING id
                    "#,
                )
                .bind(record.uuid)
                .bind(&record.kind)
                .bind(&record.description)
                .bind(&record.status)
                .bind(&record.decline_reason)
                .bind(record.created_at)
                .fetch_one(&self.pool),
            )
            .await?;

        tracing::debug!(id, uuid = %record.uuid, "Inserted verification row");
        Ok(VerificationId::new(id))
    }

    async fn update(
        &self,
        ctx: &DispatchContext,
        verification: &Verification,
    ) -> Result<(), RepositoryError> {
        let record = VerificationRecord::from_domain(verification);
        let uuid = verification.uuid();

        let rows_affected = self
            .guarded(
                ctx,
                sqlx::query(
                    r#"
                    UPDATE verifications SET
                        status = $2,
                        decline_reason = $3,
                        version = version + 1
                    WHERE uuid = $1 AND version = $4
                    "#,
                )
                .bind(record.uuid)
                .bind(&record.status)
                .bind(&record.decline_reason)
                .bind(record.version)
                .execute(&self.pool),
            )
            .await?
            .rows_affected();

        if rows_affected == 0 {
            let exists = self
                .guarded(
                    ctx,
                    sqlx::query_scalar::<_, bool>(
                        "SELECT EXISTS(SELECT 1 FROM verifications WHERE uuid = $1)",
                    )
                    .bind(record.uuid)
                    .fetch_one(&self.pool),
                )
                .await?;

            return Err(if exists {
                RepositoryError::ConcurrencyConflict(uuid)
            } else {
                RepositoryError::NotFound(uuid)
            });
        }

        Ok(())
    }

    async fn get_by_uuid(
        &self,
        ctx: &DispatchContext,
        uuid: VerificationUuid,
    ) -> Result<Verification, RepositoryError> {
        let record = self
            .guarded(
                ctx,
                sqlx::query_as::<_, VerificationRecord>(
                    r#"
                    SELECT id, uuid, kind, description, status, decline_reason, created_at, version
                    FROM verifications
                    WHERE uuid = $1
                    "#,
                )
                .bind(uuid.as_uuid())
                .fetch_optional(&self.pool),
            )
            .await?
            .ok_or(RepositoryError::NotFound(uuid))?;

        record.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verification::VerificationStatus;

    fn repository(pool: PgPool) -> PostgresVerificationRepository {
        PostgresVerificationRepository::new(pool, Duration::from_secs(5))
    }

    fn new_verification() -> Verification {
        Verification::create(&uuid::Uuid::new_v4().to_string(), "identity", "National ID card, back side")
            .unwrap()
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_insert_and_load(pool: PgPool) {
        let repository = repository(pool);
        let ctx = DispatchContext::new();
        let verification = new_verification();

        let id = repository.add(&ctx, &verification).await.unwrap();
        let loaded = repository.get_by_uuid(&ctx, verification.uuid()).await.unwrap();

        assert_eq!(loaded.id(), Some(id));
        assert_eq!(loaded.status(), VerificationStatus::Draft);
        assert_eq!(loaded.description(), verification.description());
        assert!(loaded.decline_reason().is_none());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_decline_is_persisted(pool: PgPool) {
        let repository = repository(pool);
        let ctx = DispatchContext::new();
        let verification = new_verification();
        repository.add(&ctx, &verification).await.unwrap();

        let mut loaded = repository.get_by_uuid(&ctx, verification.uuid()).await.unwrap();
        loaded.decline("Photo is blurry").unwrap();
        repository.update(&ctx, &loaded).await.unwrap();

        let stored = repository.get_by_uuid(&ctx, verification.uuid()).await.unwrap();
        assert_eq!(stored.status(), VerificationStatus::Declined);
        assert_eq!(stored.decline_reason().unwrap().as_str(), "Photo is blurry");
        assert_eq!(stored.version(), 1);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_stale_update_conflicts(pool: PgPool) {
        let repository = repository(pool);
        let ctx = DispatchContext::new();
        let verification = new_verification();
        repository.add(&ctx, &verification).await.unwrap();

        let mut first = repository.get_by_uuid(&ctx, verification.uuid()).await.unwrap();
        let mut second = repository.get_by_uuid(&ctx, verification.uuid()).await.unwrap();
        first.approve().unwrap();
        second.approve().unwrap();

        repository.update(&ctx, &first).await.unwrap();
        let result = repository.update(&ctx, &second).await;
        assert!(matches!(result, Err(RepositoryError::ConcurrencyConflict(_))));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_missing_row(pool: PgPool) {
        let repository = repository(pool);
        let ctx = DispatchContext::new();
        let verification = new_verification();

        let result = repository.get_by_uuid(&ctx, verification.uuid()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));

        let result = repository.update(&ctx, &verification).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }
}
