//! Runs the civic issue reporting server.
//!
//! Usage:
//!
//! ```text
//! civic_server [--bind 127.0.0.1:3000] [--database-url postgres://...]
//! ```
//!
//! Every flag can also be set through its `CIVIC_*` environment variable;
//! `--help` lists them. Without `DATABASE_URL`, issues live in memory and
//! are lost on exit.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use mockable::DefaultClock;
use tower_http::cors::CorsLayer;

use civic_connect::{
    access::{adapters::InMemorySessionStore, ports::SessionStore, services::AuthService},
    config::ServerConfig,
    http::{AppState, build_router},
    issue::{
        adapters::{
            NominatimGeocoder,
            memory::{InMemoryIssueRepository, demo_issues},
            postgres::PostgresIssueRepository,
        },
        ports::IssueRepository,
    },
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    telemetry::init(config.log_format)?;

    let repository = open_repository(&config).await?;
    let geocoder = NominatimGeocoder::new(
        config.geocoder_url.clone(),
        &config.geocoder_user_agent,
        config.geocoder_timeout(),
    )
    .context("failed to build geocoder client")?;

    let mut auth = AuthService::new(
        Arc::new(InMemorySessionStore::new()) as Arc<dyn SessionStore>,
        Arc::new(DefaultClock),
    )
        .with_session_ttl(config.session_ttl());
    match config
        .admin_credentials()
        .context("invalid admin credentials")?
    {
        Some(admin) => {
            tracing::info!(admin = admin.email(), "admin account configured");
            auth = auth.with_admin(admin);
        }
        None => tracing::warn!("no admin account configured; the admin board is unreachable"),
    }

    let state = AppState::new(repository, Arc::new(geocoder), auth)
        .context("failed to compile page templates")?
        .shared();
    let mut app = build_router(state);
    if config.permissive_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, "civic server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

async fn open_repository(config: &ServerConfig) -> anyhow::Result<Arc<dyn IssueRepository>> {
    let Some(url) = config.database_url.clone() else {
        let repository = if config.seed_demo {
            let seeded = demo_issues();
            tracing::info!(count = seeded.len(), "using in-memory store with demo issues");
            InMemoryIssueRepository::with_issues(seeded)
        } else {
            tracing::info!("using empty in-memory store");
            InMemoryIssueRepository::new()
        };
        return Ok(Arc::new(repository));
    };

    let max_size = config.db_pool_size;
    let pool = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(max_size)
            .build(ConnectionManager::<PgConnection>::new(url))
    })
    .await
    .context("database pool task failed")?
    .context("failed to connect to PostgreSQL")?;

    let repository = PostgresIssueRepository::new(pool);
    repository
        .ensure_schema()
        .await
        .context("failed to prepare issues table")?;
    tracing::info!(pool_size = max_size, "using PostgreSQL store");
    Ok(Arc::new(repository))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
