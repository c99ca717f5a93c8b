use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};

use crate::application::verification::{VerificationCommandBus, VerificationQueryBus};
use crate::context::DispatchContext;
use crate::metrics::Metrics;

mod dto;
mod error;
mod handlers;

pub use dto::{
    CreateVerificationRequest, DeclineVerificationRequest, VerificationResponse,
    VerificationUuidResponse,
};
pub use error::{ApiError, FieldViolation};
pub use handlers::configure;

// ============================================================================
// HTTP Server
// ============================================================================
//
// Thin adapter: decode and validate the body, build a command or query,
// hand it to the bus. No domain logic lives here.
//
// ============================================================================

/// Shared state handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub command_bus: Arc<VerificationCommandBus>,
    pub query_bus: Arc<VerificationQueryBus>,
    pub metrics: Arc<Metrics>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        command_bus: Arc<VerificationCommandBus>,
        query_bus: Arc<VerificationQueryBus>,
        metrics: Arc<Metrics>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            command_bus,
            query_bus,
            metrics,
            request_timeout,
        }
    }

    /// Fresh context for one request
    pub fn context(&self) -> DispatchContext {
        DispatchContext::with_timeout(self.request_timeout)
    }
}

pub async fn run_server(state: AppState, port: u16, shutdown_timeout: Duration) -> std::io::Result<()> {
    tracing::info!("🚀 Starting HTTP server on http://0.0.0.0:{}", port);

    let data = web::Data::new(state);

    HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .shutdown_timeout(shutdown_timeout.as_secs())
        .bind(("0.0.0.0", port))?
        .run()
        .await?;

    tracing::info!("✅ HTTP server stopped");
    Ok(())
}
