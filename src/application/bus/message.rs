use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;

use crate::context::DispatchContext;

use super::error::BusError;

// ============================================================================
// Bus Message Abstractions
// ============================================================================
//
// A message reports an explicit type tag. Buses route on the tag, handlers
// match on the message variant. No runtime type inspection is involved.
//
// ============================================================================

/// Discriminant used as the routing key on a bus
pub trait MessageType: Copy + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static {}

impl<T> MessageType for T where T: Copy + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static {}

/// A request for a state change. Returns only success or failure.
pub trait Command: fmt::Debug + Send + 'static {
    type Type: MessageType;

    fn command_type(&self) -> Self::Type;
}

/// A request for data.
pub trait Query: fmt::Debug + Send + 'static {
    type Type: MessageType;
    type Response: Send + 'static;

    fn query_type(&self) -> Self::Type;
}

#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, ctx: &DispatchContext, command: C) -> Result<(), BusError>;
}

#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, ctx: &DispatchContext, query: Q) -> Result<Q::Response, BusError>;
}
