use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::context::DispatchContext;
use crate::metrics::Metrics;

use super::error::BusError;
use super::message::{Query, QueryHandler};

// ============================================================================
// In-Memory Query Bus
// ============================================================================

pub struct QueryBus<Q: Query> {
    handlers: HashMap<Q::Type, Arc<dyn QueryHandler<Q>>>,
    metrics: Option<Arc<Metrics>>,
}

impl<Q: Query> QueryBus<Q> {
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

    /// Associate a handler with a query type. The last registration wins.
    pub fn register(&mut self, query_type: Q::Type, handler: Arc<dyn QueryHandler<Q>>) {
        if self.handlers.insert(query_type, handler).is_some() {
            tracing::debug!(query_type = %query_type, "Replaced query handler");
        }
    }

    pub async fn ask(&self, ctx: &DispatchContext, query: Q) -> Result<Q::Response, BusError> {
        let query_type = query.query_type();
        let started = Instant::now();

        let result = match self.handlers.get(&query_type) {
            Some(handler) => handler.handle(ctx, query).await,
            None => Err(BusError::HandlerNotFound(query_type.to_string())),
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };

        tracing::debug!(
            query_type = %query_type,
            outcome = outcome,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Answered query"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_dispatch(
                "query",
                &query_type.to_string(),
                outcome,
                started.elapsed().as_secs_f64(),
            );
        }

        result
    }
}

impl<Q: Query> Default for QueryBus<Q> {
    fn default() -> Self {
        Self::new()
    }
}
