// ============================================================================
// Verification Domain - Business Logic for Verification Aggregate
// ============================================================================
//
// This module contains ALL Verification-specific domain code:
// - Value objects (VerificationUuid, VerificationKind, VerificationStatus, etc.)
// - Errors (VerificationError enum)
// - Aggregate (Verification with its state machine)
// - Repository contract (VerificationRepository)
//
// Command/query handlers live in the application layer.
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod aggregate;
pub mod repository;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
