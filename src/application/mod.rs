//! Application layer - Use cases and orchestration
//!
//! Implements the CQRS pattern: commands change state through the command
//! bus, queries read it through the query bus.

pub mod bus;
pub mod verification;
