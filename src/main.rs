//! Shelfnote - GraphQL API for books and reader reviews
//!
//! This is the main entry point for the Shelfnote server.
//! All operations are exposed via GraphQL at /graphql.

mod api;
mod app;
mod cli;
mod config;
mod db;
mod error;
mod graphql;
mod services;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{AppState, build_app};
use crate::cli::CliOptions;
use crate::config::Config;
use crate::db::Database;
use crate::db::seed::{DEMO_PASSWORD, run_seeds};
use crate::graphql::{PageSize, SessionCookie};
use crate::services::{AuthConfig, AuthService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelfnote=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let cli = CliOptions::from_args();
    let config = Arc::new(Config::from_env()?);

    tracing::info!("Starting Shelfnote");
    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    db.migrate().await?;
    tracing::info!(url = %config.database_url, "Database connected");

    let auth = AuthService::new(db.clone(), AuthConfig::from_config(&config));

    if cli.seed || config.seed_database {
        let password_hash = auth.hash_password(DEMO_PASSWORD)?;
        run_seeds(&db, &password_hash).await;
    }

    let session_cookie = SessionCookie::new(config.session_cookie.clone());
    let schema = graphql::build_schema(
        db.clone(),
        auth.clone(),
        session_cookie.clone(),
        PageSize(config.page_size),
    );
    tracing::info!("GraphQL schema built");

    let state = AppState {
        config: config.clone(),
        db: db.clone(),
        schema,
        auth,
        session_cookie,
    };
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
