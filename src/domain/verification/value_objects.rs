use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::VerificationError;

// ============================================================================
// Verification Value Objects
// ============================================================================
//
// Every value object is built through a single validating constructor.
// Once built it never changes.
//
// ============================================================================

/// Storage-assigned surrogate key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationId(i64);

impl VerificationId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-visible unique identifier, assigned before first persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationUuid(Uuid);

impl VerificationUuid {
    pub fn parse(value: &str) -> Result<Self, VerificationError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| VerificationError::InvalidIdentifier(value.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for VerificationUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for VerificationUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationKind {
    Identity,
    Document,
}

impl VerificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationKind::Identity => "identity",
            VerificationKind::Document => "document",
        }
    }
}

impl FromStr for VerificationKind {
    type Err = VerificationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "identity" => Ok(VerificationKind::Identity),
            "document" => Ok(VerificationKind::Document),
            other => Err(VerificationError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for VerificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDescription(String);

impl VerificationDescription {
    pub fn new(value: impl Into<String>) -> Result<Self, VerificationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(VerificationError::EmptyDescription);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status. `Draft` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Draft,
    Approved,
    Declined,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Draft => "draft",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Declined => "declined",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerificationStatus::Draft)
    }
}

impl FromStr for VerificationStatus {
    type Err = VerificationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(VerificationStatus::Draft),
            "approved" => Ok(VerificationStatus::Approved),
            "declined" => Ok(VerificationStatus::Declined),
            other => Err(VerificationError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclineReason(String);

impl DeclineReason {
    pub fn new(value: impl Into<String>) -> Result<Self, VerificationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(VerificationError::EmptyDeclineReason);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_parses_valid_value() {
        let raw = "c1d1a0c4-7a51-4b0e-9f3e-3b3b1f8f3a11";
        let uuid = VerificationUuid::parse(raw).unwrap();
        assert_eq!(uuid.to_string(), raw);
    }

    #[test]
    fn test_uuid_rejects_invalid_values() {
        for raw in ["", "not-a-uuid", "c1d1a0c4-7a51-4b0e-9f3e", "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"] {
            let result = VerificationUuid::parse(raw);
            assert!(
                matches!(result, Err(VerificationError::InvalidIdentifier(ref v)) if v == raw),
                "expected InvalidIdentifier for {raw:?}"
            );
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("identity".parse::<VerificationKind>().unwrap(), VerificationKind::Identity);
        assert_eq!("document".parse::<VerificationKind>().unwrap(), VerificationKind::Document);
        assert!(matches!(
            "passport".parse::<VerificationKind>(),
            Err(VerificationError::InvalidKind(_))
        ));
        // Case matters
        assert!("Identity".parse::<VerificationKind>().is_err());
    }

    #[test]
    fn test_description_must_not_be_empty() {
        assert!(matches!(
            VerificationDescription::new(""),
            Err(VerificationError::EmptyDescription)
        ));
        assert_eq!(VerificationDescription::new("scan").unwrap().as_str(), "scan");
    }

    #[test]
    fn test_status_parsing_and_terminality() {
        let draft: VerificationStatus = "draft".parse().unwrap();
        assert!(!draft.is_terminal());
        assert!("approved".parse::<VerificationStatus>().unwrap().is_terminal());
        assert!("declined".parse::<VerificationStatus>().unwrap().is_terminal());
        assert!(matches!(
            "pending".parse::<VerificationStatus>(),
            Err(VerificationError::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_decline_reason_must_not_be_empty() {
        assert!(matches!(DeclineReason::new(""), Err(VerificationError::EmptyDeclineReason)));
        assert_eq!(DeclineReason::new("blurry").unwrap().as_str(), "blurry");
    }

    #[test]
    fn test_status_serializes_as_lowercase_string() {
        let json = serde_json::to_string(&VerificationStatus::Declined).unwrap();
        assert_eq!(json, "\"declined\"");
        let kind: VerificationKind = serde_json::from_str("\"document\"").unwrap();
        assert_eq!(kind, VerificationKind::Document);
    }
}
