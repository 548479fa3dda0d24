//! Cron entry point that force-closes overdue tasks.
//!
//! Wires the application configuration, the `PostgreSQL` adapters, and the
//! task lifecycle service, then runs one autoclose sweep and logs the
//! number of tasks closed. Scheduling is left to the operating system
//! (cron, systemd timers).
//!
//! Environment:
//!
//! - `DATABASE_URL` (required): `PostgreSQL` connection string
//! - `RUST_LOG` (optional): tracing filter, defaults to `info`
//! - `PROJECT_OF_NUMBER_MAX` / `TASK_OF_NUMBER_MAX` (optional): limits
//!
//! A `.env` file in the working directory is loaded before the environment
//! is read.

use std::sync::Arc;

use aalto::config::AppConfig;
use aalto::project::adapters::postgres::PostgresProjectRepository;
use aalto::task::adapters::postgres::PostgresTaskRepository;
use aalto::task::services::{TaskLifecycleError, TaskLifecycleService};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors surfaced by the autoclose entry point.
#[derive(Debug, Error)]
enum AutocloseCommandError {
    /// The `DATABASE_URL` environment variable is missing.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(String),

    /// The sweep itself failed.
    #[error("autoclose sweep failed: {0}")]
    Sweep(#[from] TaskLifecycleError),
}

#[tokio::main]
async fn main() -> Result<(), AutocloseCommandError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded environment overrides");
    }

    let config = Arc::new(AppConfig::from_env());
    tracing::info!(
        app = config.app_name(),
        version = config.app_version(),
        "starting autoclose sweep"
    );

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| AutocloseCommandError::MissingDatabaseUrl)?;
    let pool = Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(|err| AutocloseCommandError::Pool(err.to_string()))?;

    let service = TaskLifecycleService::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresProjectRepository::new(pool)),
        config,
        Arc::new(DefaultClock),
    );

    let closed = service.autoclose_overdue().await?;
    tracing::info!(closed, "autoclose sweep complete");
    Ok(())
}
