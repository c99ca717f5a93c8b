// ============================================================================
// Verification Use Cases
// ============================================================================
//
// Commands, queries and their handlers for the Verification aggregate, plus
// the startup wiring that registers them on the buses.
//
// ============================================================================

pub mod commands;
pub mod queries;

pub use commands::*;
pub use queries::*;

use std::sync::Arc;

use crate::application::bus::{CommandBus, QueryBus};
use crate::domain::verification::VerificationRepository;

pub type VerificationCommandBus = CommandBus<VerificationCommand>;
pub type VerificationQueryBus = QueryBus<VerificationQuery>;

/// Register every verification handler on the given buses
pub fn register_handlers(
    command_bus: &mut VerificationCommandBus,
    query_bus: &mut VerificationQueryBus,
    repository: Arc<dyn VerificationRepository>,
) {
    command_bus.register(
        VerificationCommandType::Create,
        Arc::new(CreateVerificationHandler::new(repository.clone())),
    );
    command_bus.register(
        VerificationCommandType::Approve,
        Arc::new(ApproveVerificationHandler::new(repository.clone())),
    );
    command_bus.register(
        VerificationCommandType::Decline,
        Arc::new(DeclineVerificationHandler::new(repository.clone())),
    );

    query_bus.register(
        VerificationQueryType::GetByUuid,
        Arc::new(GetVerificationByUuidHandler::new(repository)),
    );

    tracing::debug!("Registered verification command and query handlers");
}
