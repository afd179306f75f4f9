//! Campus Lost & Found - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin lostfound-api
//!
//! # Run with environment variables
//! APP__HOST=0.0.0.0 APP__PORT=8080 APP__DATABASE_URL=postgres://... cargo run --bin lostfound-api
//! ```
//!
//! # Environment Variables
//!
//! Variables use the `APP` prefix with `__` for nesting:
//!
//! * `APP__HOST` / `APP__PORT` - bind address (default 0.0.0.0:8080)
//! * `APP__JWT_SECRET` - JWT signing secret (required in production)
//! * `APP__JWT_EXPIRATION_SECS` - token validity (default: 3600)
//! * `APP__DATABASE_URL` - PostgreSQL connection string
//! * `APP__LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `APP__SMTP__HOST`, `APP__SMTP__PORT`, `APP__SMTP__USERNAME`,
//!   `APP__SMTP__PASSWORD`, `APP__SMTP__SENDER` - mail relay; when unset,
//!   notifications stay queued in the outbox
//! * `APP__OUTBOX__POLL_INTERVAL_SECS`, `APP__OUTBOX__BATCH_SIZE`,
//!   `APP__OUTBOX__MAX_ATTEMPTS` - outbox drain loop

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, DatabaseConfig};
use infra_mail::{DispatcherHandle, OutboxDispatcher, SmtpMailer};
use infra_db::OutboxRepository;
use interface_api::{config::ApiConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().unwrap_or_default();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Campus Lost & Found API server"
    );

    let pool = create_pool(DatabaseConfig::new(&config.database_url))
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database ready");

    let outbox_handle = start_dispatcher(&pool, &config);

    let app = create_router(pool, config.clone(), outbox_handle);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Spawns the outbox dispatcher when SMTP is configured.
///
/// Without SMTP settings the server still runs; approval notifications
/// accumulate in the outbox until a configured deployment drains them.
fn start_dispatcher(pool: &sqlx::PgPool, config: &ApiConfig) -> DispatcherHandle {
    match &config.smtp {
        Some(smtp) => {
            let mailer = Arc::new(SmtpMailer::new(smtp.clone()));
            let dispatcher = OutboxDispatcher::new(
                OutboxRepository::new(pool.clone()),
                mailer,
                config.outbox.clone(),
            );
            let handle = dispatcher.handle();
            tokio::spawn(dispatcher.run());
            handle
        }
        None => {
            tracing::warn!("SMTP not configured; notifications will stay queued in the outbox");
            DispatcherHandle::disconnected()
        }
    }
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM so in-flight requests can complete
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => {
                tracing::error!("Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
