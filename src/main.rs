use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use verification_service::application::verification::{
    register_handlers, VerificationCommandBus, VerificationQueryBus,
};
use verification_service::config::{Cli, Command, DatabaseArgs, ServeArgs, StorageKind};
use verification_service::domain::verification::VerificationRepository;
use verification_service::infrastructure::http::{run_server, AppState};
use verification_service::infrastructure::persistence::{
    migrator, InMemoryVerificationRepository, PostgresVerificationRepository,
};
use verification_service::logging::init_logging;
use verification_service::metrics::Metrics;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, &cli.log_level);

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Migrate(args) => migrate(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    tracing::info!("🚀 Starting verification service");

    // === 1. Storage ===
    let repository: Arc<dyn VerificationRepository> = match args.storage {
        StorageKind::Postgres => {
            let pool = args
                .database
                .connect()
                .await
                .context("failed to connect to PostgreSQL")?;
            tracing::info!("✅ Connected to PostgreSQL");
            Arc::new(PostgresVerificationRepository::new(pool, args.database.timeout()))
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage, verifications are lost on restart");
            Arc::new(InMemoryVerificationRepository::new())
        }
    };

    // === 2. Metrics ===
    let metrics = Arc::new(Metrics::new().context("failed to create metrics registry")?);

    // === 3. Buses ===
    let mut command_bus = VerificationCommandBus::new().with_metrics(metrics.clone());
    let mut query_bus = VerificationQueryBus::new().with_metrics(metrics.clone());
    register_handlers(&mut command_bus, &mut query_bus, repository);

    // === 4. HTTP ===
    let state = AppState::new(
        Arc::new(command_bus),
        Arc::new(query_bus),
        metrics,
        args.request_timeout(),
    );

    run_server(state, args.port, args.shutdown_timeout())
        .await
        .context("HTTP server failed")?;

    tracing::info!("👋 Verification service stopped");
    Ok(())
}

async fn migrate(args: DatabaseArgs) -> anyhow::Result<()> {
    let pool = args.connect().await.context("failed to connect to PostgreSQL")?;

    migrator()
        .run(&pool)
        .await
        .context("failed to apply migrations")?;

    tracing::info!("✅ Migrations applied");
    Ok(())
}
