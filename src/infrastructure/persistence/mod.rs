// ============================================================================
// Persistence Adapters
// ============================================================================

pub mod memory;
pub mod model;
pub mod postgres;

pub use memory::InMemoryVerificationRepository;
pub use model::VerificationRecord;
pub use postgres::{migrator, PostgresVerificationRepository};
