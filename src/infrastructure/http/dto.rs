use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::verification::Verification;

use super::error::{ApiError, FieldViolation};

// ============================================================================
// Request / Response Bodies
// ============================================================================

const MIN_DESCRIPTION_CHARS: usize = 10;
const MIN_DECLINE_REASON_CHARS: usize = 5;
const KINDS: [&str; 2] = ["identity", "document"];

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVerificationRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: String,
}

impl CreateVerificationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut violations = Vec::new();

        if let Some(violation) = min_chars("description", &self.description, MIN_DESCRIPTION_CHARS) {
            violations.push(violation);
        }

        if self.kind.is_empty() {
            violations.push(FieldViolation::new("kind", "kind is required"));
        } else if !KINDS.contains(&self.kind.as_str()) {
            violations.push(FieldViolation::new(
                "kind",
                format!("kind must be one of [{}]", KINDS.join(" ")),
            ));
        }

        ApiError::from_violations(violations)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclineVerificationRequest {
    #[serde(default)]
    pub decline_reason: String,
}

impl DeclineVerificationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let violations = min_chars("declineReason", &self.decline_reason, MIN_DECLINE_REASON_CHARS)
            .into_iter()
            .collect();

        ApiError::from_violations(violations)
    }
}

/// Lengths are counted in characters, not bytes
fn min_chars(property: &str, value: &str, min: usize) -> Option<FieldViolation> {
    if value.is_empty() {
        Some(FieldViolation::new(property, format!("{property} is required")))
    } else if value.chars().count() < min {
        Some(FieldViolation::new(
            property,
            format!("{property} must be at least {min} characters long"),
        ))
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationUuidResponse {
    pub uuid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub id: i64,
    pub uuid: String,
    pub kind: String,
    pub description: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Verification> for VerificationResponse {
    fn from(verification: &Verification) -> Self {
        Self {
            id: verification.id().map_or(0, |id| id.value()),
            uuid: verification.uuid().to_string(),
            kind: verification.kind().to_string(),
            description: verification.description().as_str().to_string(),
            status: verification.status().to_string(),
            decline_reason: verification.decline_reason().map(|r| r.as_str().to_string()),
            created_at: verification.created_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(description: &str, kind: &str) -> CreateVerificationRequest {
        CreateVerificationRequest {
            description: description.into(),
            kind: kind.into(),
        }
    }

    fn violations(result: Result<(), ApiError>) -> Vec<FieldViolation> {
        match result {
            Err(ApiError::Validation(violations)) => violations,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create("Passport, photo page", "identity").validate().is_ok());
        assert!(create("Bank statement", "document").validate().is_ok());
    }

    #[test]
    fn test_short_description() {
        let violations = violations(create("too short", "identity").validate());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].property_path, "description");
    }

    #[test]
    fn test_description_counts_characters() {
        // 10 characters, 20 bytes
        assert!(create("ääääääääää", "document").validate().is_ok());
    }

    #[test]
    fn test_every_violation_is_reported() {
        let violations = violations(create("", "retina").validate());
        let paths: Vec<_> = violations.iter().map(|v| v.property_path.as_str()).collect();
        assert_eq!(paths, vec!["description", "kind"]);
    }

    #[test]
    fn test_decline_reason_length() {
        let short = DeclineVerificationRequest { decline_reason: "blur".into() };
        assert_eq!(violations(short.validate())[0].property_path, "declineReason");

        let ok = DeclineVerificationRequest { decline_reason: "Too blurry".into() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_decline_request_uses_camel_case() {
        let request: DeclineVerificationRequest =
            serde_json::from_str(r#"{"declineReason":"Expired document"}"#).unwrap();
        assert_eq!(request.decline_reason, "Expired document");
    }

    #[test]
    fn test_response_omits_missing_reason() {
        let verification = Verification::create(
            &uuid::Uuid::new_v4().to_string(),
            "identity",
            "Selfie holding the ID card",
        )
        .unwrap();

        let json = serde_json::to_value(VerificationResponse::from(&verification)).unwrap();
        assert_eq!(json["status"], "draft");
        assert_eq!(json["kind"], "identity");
        assert!(json.get("declineReason").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
