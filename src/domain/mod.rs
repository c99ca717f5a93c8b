// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Value objects
// - Errors
// - Aggregate implementation
// - Repository contract
//
// This layer knows nothing about buses, HTTP or SQL.
//
// ============================================================================

pub mod verification;
