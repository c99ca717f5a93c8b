use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::context::DispatchContext;
use crate::metrics::Metrics;

use super::error::BusError;
use super::message::{Command, CommandHandler};

// ============================================================================
// In-Memory Command Bus
// ============================================================================
//
// Routes a command to the handler registered for its type tag and awaits it
// within the caller's flow. No queueing, no retries.
//
// Handlers are registered through `&mut self` during startup. Afterwards the
// bus is shared read-only behind an `Arc`.
//
// ============================================================================

pub struct CommandBus<C: Command> {
    handlers: HashMap<C::Type, Arc<dyn CommandHandler<C>>>,
    metrics: Option<Arc<Metrics>>,
}

impl<C: Command> CommandBus<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Associate a handler with a command type. The last registration wins.
    pub fn register(&mut self, command_type: C::Type, handler: Arc<dyn CommandHandler<C>>) {
        if self.handlers.insert(command_type, handler).is_some() {
            tracing::debug!(command_type = %command_type, "Replaced command handler");
        }
    }

    pub async fn dispatch(&self, ctx: &DispatchContext, command: C) -> Result<(), BusError> {
        let command_type = command.command_type();
        let started = Instant::now();

        let result = match self.handlers.get(&command_type) {
            Some(handler) => handler.handle(ctx, command).await,
            None => Err(BusError::HandlerNotFound(command_type.to_string())),
        };

        let outcome = match &result {
            Ok(()) => "ok",
            Err(e) => e.kind(),
        };

        tracing::debug!(
            command_type = %command_type,
            outcome = outcome,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dispatched command"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_dispatch(
                "command",
                &command_type.to_string(),
                outcome,
                started.elapsed().as_secs_f64(),
            );
        }

        result
    }
}

impl<C: Command> Default for CommandBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
