use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::logging::{LogFormat, DEFAULT_LOG_LEVEL};

// ============================================================================
// Configuration
// ============================================================================
//
// Every option is a CLI flag with an environment variable fallback.
// Timeouts are whole seconds.
//
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "verification-service", about = "Verification lifecycle service", version)]
pub struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "human", env = "LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Tracing filter, overridden by RUST_LOG when set
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "LOG_LEVEL", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Apply pending database migrations and exit
    Migrate(DatabaseArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    Postgres,
    Memory,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// HTTP listen port
    #[arg(long, default_value_t = 80, env = "PORT")]
    pub port: u16,

    /// Seconds to let in-flight requests finish on shutdown
    #[arg(long, default_value_t = 10, env = "SHUTDOWN_TIMEOUT")]
    pub shutdown_timeout: u64,

    /// Seconds each request may spend in the buses
    #[arg(long, default_value_t = 10, env = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    #[arg(long, value_enum, default_value = "postgres", env = "STORAGE")]
    pub storage: StorageKind,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    #[arg(long, default_value = "postgres", env = "DATABASE_USER")]
    pub database_user: String,

    #[arg(long, default_value = "", env = "DATABASE_PASSWORD", hide_env_values = true)]
    pub database_password: String,

    #[arg(long, default_value = "localhost", env = "DATABASE_HOST")]
    pub database_host: String,

    #[arg(long, default_value_t = 5432, env = "DATABASE_PORT")]
    pub database_port: u16,

    #[arg(long, default_value = "verifications", env = "DATABASE_NAME")]
    pub database_name: String,

    /// Seconds allowed per statement and per connection acquire
    #[arg(long, default_value_t = 5, env = "DATABASE_TIMEOUT")]
    pub database_timeout: u64,

    #[arg(long, default_value_t = 10, env = "DATABASE_MAX_CONNECTIONS")]
    pub database_max_connections: u32,
}

impl DatabaseArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.database_timeout)
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.database_host)
            .port(self.database_port)
            .username(&self.database_user)
            .password(&self.database_password)
            .database(&self.database_name)
    }

    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        tracing::info!(
            host = %self.database_host,
            port = self.database_port,
            database = %self.database_name,
            "Connecting to PostgreSQL..."
        );

        PgPoolOptions::new()
            .max_connections(self.database_max_connections)
            .acquire_timeout(self.timeout())
            .connect_with(self.connect_options())
            .await
    }
}
