use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

use super::errors::VerificationError;
use super::value_objects::{
    DeclineReason, VerificationDescription, VerificationId, VerificationKind, VerificationStatus,
    VerificationUuid,
};

// ============================================================================
// Verification Aggregate - Domain Logic
// ============================================================================
//
// State machine:
//
//   draft --approve--> approved
//   draft --decline--> declined
//
// approved and declined are terminal. Every other edge fails with
// AlreadyProcessed and leaves the aggregate untouched.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verification {
    // Identity
    id: Option<VerificationId>,
    uuid: VerificationUuid,
    version: i64,

    // Fixed at creation
    kind: VerificationKind,
    description: VerificationDescription,
    created_at: DateTime<Utc>,

    // Lifecycle
    status: VerificationStatus,
    decline_reason: Option<DeclineReason>,
}

impl Verification {
    /// Create a new draft verification.
    ///
    /// Fields are validated in order uuid, kind, description and the first
    /// failure is returned.
    pub fn create(uuid: &str, kind: &str, description: &str) -> Result<Self, VerificationError> {
        let uuid = VerificationUuid::parse(uuid)?;
        let kind = kind.parse::<VerificationKind>()?;
        let description = VerificationDescription::new(description)?;

        Ok(Self {
            id: None,
            uuid,
            version: 0,
            kind,
            description,
            // Microseconds, the precision TIMESTAMPTZ keeps
            created_at: Utc::now().trunc_subsecs(6),
            status: VerificationStatus::Draft,
            decline_reason: None,
        })
    }

    /// Restore state loaded from storage.
    ///
    /// Status is force-set without going through the transition rules.
    pub fn reconstitute(
        mut self,
        id: VerificationId,
        status: &str,
        decline_reason: Option<&str>,
        created_at: DateTime<Utc>,
        version: i64,
    ) -> Result<Self, VerificationError> {
        self.status = status.parse()?;
        if let Some(reason) = decline_reason {
            self.decline_reason = Some(DeclineReason::new(reason)?);
        }
        self.id = Some(id);
        self.created_at = created_at;
        self.version = version;
        Ok(self)
    }

    pub fn approve(&mut self) -> Result<(), VerificationError> {
        self.ensure_draft()?;

        self.status = VerificationStatus::Approved;
        tracing::debug!(uuid = %self.uuid, "Verification approved");
        Ok(())
    }

    pub fn decline(&mut self, reason: &str) -> Result<(), VerificationError> {
        // Status gate first: AlreadyProcessed wins over an empty reason
        self.ensure_draft()?;
        let reason = DeclineReason::new(reason)?;

        self.decline_reason = Some(reason);
        self.status = VerificationStatus::Declined;
        tracing::debug!(uuid = %self.uuid, "Verification declined");
        Ok(())
    }

    fn ensure_draft(&self) -> Result<(), VerificationError> {
        if self.status.is_terminal() {
            tracing::debug!(
                uuid = %self.uuid,
                status = %self.status,
                "Rejected transition on processed verification"
            );
            return Err(VerificationError::AlreadyProcessed);
        }
        Ok(())
    }

    pub fn id(&self) -> Option<VerificationId> {
        self.id
    }

    pub fn uuid(&self) -> VerificationUuid {
        self.uuid
    }

    pub fn kind(&self) -> VerificationKind {
        self.kind
    }

    pub fn description(&self) -> &VerificationDescription {
        &self.description
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    pub fn decline_reason(&self) -> Option<&DeclineReason> {
        self.decline_reason.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Optimistic concurrency version as last read from storage
    pub fn version(&self) -> i64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const UUID: &str = "c1d1a0c4-7a51-4b0e-9f3e-3b3b1f8f3a11";
    const DESCRIPTION: &str = "Fancy verification document description";

    fn draft() -> Verification {
        Verification::create(UUID, "identity", DESCRIPTION).unwrap()
    }

    #[test]
    fn test_create_starts_in_draft() {
        let verification = draft();

        assert_eq!(verification.uuid().to_string(), UUID);
        assert_eq!(verification.kind(), VerificationKind::Identity);
        assert_eq!(verification.description().as_str(), DESCRIPTION);
        assert_eq!(verification.status(), VerificationStatus::Draft);
        assert!(verification.decline_reason().is_none());
        assert!(verification.id().is_none());
        assert_eq!(verification.version(), 0);
    }

    #[test]
    fn test_created_at_fits_timestamptz_precision() {
        let verification = draft();
        assert_eq!(verification.created_at().timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_create_accepts_both_kinds() {
        for kind in ["identity", "document"] {
            let verification = Verification::create(UUID, kind, DESCRIPTION).unwrap();
            assert_eq!(verification.kind().as_str(), kind);
            assert_eq!(verification.status(), VerificationStatus::Draft);
        }
    }

    #[test]
    fn test_create_reports_first_validation_error() {
        // Everything invalid: identifier is checked first
        let result = Verification::create("bad", "bad", "");
        assert!(matches!(result, Err(VerificationError::InvalidIdentifier(_))));

        let result = Verification::create(UUID, "bad", "");
        assert!(matches!(result, Err(VerificationError::InvalidKind(_))));

        let result = Verification::create(UUID, "document", "");
        assert_eq!(result.unwrap_err(), VerificationError::EmptyDescription);
    }

    #[test]
    fn test_approve_succeeds_exactly_once() {
        let mut verification = draft();

        verification.approve().unwrap();
        assert_eq!(verification.status(), VerificationStatus::Approved);

        let result = verification.approve();
        assert_eq!(result.unwrap_err(), VerificationError::AlreadyProcessed);
        assert_eq!(verification.status(), VerificationStatus::Approved);
    }

    #[test]
    fn test_decline_sets_reason_and_status() {
        let mut verification = draft();

        verification.decline("Bad document quality").unwrap();
        assert_eq!(verification.status(), VerificationStatus::Declined);
        assert_eq!(verification.decline_reason().unwrap().as_str(), "Bad document quality");

        let result = verification.approve();
        assert_eq!(result.unwrap_err(), VerificationError::AlreadyProcessed);
        assert_eq!(verification.status(), VerificationStatus::Declined);
    }

    #[test]
    fn test_decline_with_empty_reason_leaves_draft() {
        let mut verification = draft();

        let result = verification.decline("");
        assert_eq!(result.unwrap_err(), VerificationError::EmptyDeclineReason);
        assert_eq!(verification.status(), VerificationStatus::Draft);
        assert!(verification.decline_reason().is_none());
    }

    #[test]
    fn test_already_processed_wins_over_empty_reason() {
        let mut verification = draft();
        verification.approve().unwrap();

        let result = verification.decline("");
        assert_eq!(result.unwrap_err(), VerificationError::AlreadyProcessed);
        assert!(verification.decline_reason().is_none());
    }

    #[test]
    fn test_decline_after_approve_fails() {
        let mut verification = draft();
        verification.approve().unwrap();

        let result = verification.decline("x");
        assert_eq!(result.unwrap_err(), VerificationError::AlreadyProcessed);
        assert_eq!(verification.status(), VerificationStatus::Approved);
    }

    #[test]
    fn test_reconstitute_restores_stored_state() {
        let created_at = Utc::now() - chrono::Duration::days(3);

        let verification = draft()
            .reconstitute(VerificationId::new(42), "declined", Some("Expired"), created_at, 2)
            .unwrap();

        assert_eq!(verification.id(), Some(VerificationId::new(42)));
        assert_eq!(verification.status(), VerificationStatus::Declined);
        assert_eq!(verification.decline_reason().unwrap().as_str(), "Expired");
        assert_eq!(verification.created_at(), created_at);
        assert_eq!(verification.version(), 2);
    }

    #[test]
    fn test_reconstitute_bypasses_transition_rules() {
        let mut verification = draft();
        verification.approve().unwrap();

        // Storage says draft: trust it
        let verification = verification
            .reconstitute(VerificationId::new(1), "draft", None, Utc::now(), 0)
            .unwrap();
        assert_eq!(verification.status(), VerificationStatus::Draft);
    }

    #[test]
    fn test_reconstitute_rejects_bad_status_and_empty_reason() {
        let result = draft().reconstitute(VerificationId::new(1), "pending", None, Utc::now(), 0);
        assert!(matches!(result, Err(VerificationError::InvalidStatus(_))));

        let result = draft().reconstitute(VerificationId::new(1), "declined", Some(""), Utc::now(), 0);
        assert_eq!(result.unwrap_err(), VerificationError::EmptyDeclineReason);
    }
}
