// ============================================================================
// CQRS Bus Infrastructure
// ============================================================================
//
// Generic, reusable command/query dispatch. Works with any message enum that
// reports a type tag. Domain-specific messages live in application::verification.
//
// ============================================================================

mod command_bus;
mod error;
mod message;
mod query_bus;

pub use command_bus::CommandBus;
pub use error::BusError;
pub use message::{Command, CommandHandler, MessageType, Query, QueryHandler};
pub use query_bus::QueryBus;
