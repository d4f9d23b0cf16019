//! Health check endpoints

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::app::AppState;
use crate::db::schema;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub database: bool,
    /// users, books and reviews tables are all present
    pub schema: bool,
}

/// Health check - always returns OK if the server is running
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check - the database answers and holds every catalogue table
async fn readyz(State(state): State<AppState>) -> Json<ReadyResponse> {
    let pool = state.db.pool();
    let db_ok = sqlx::query("SELECT 1").fetch_one(pool).await.is_ok();

    let schema_ok = db_ok
        && match schema::missing_tables(pool).await {
            Ok(missing) if missing.is_empty() => true,
            Ok(missing) => {
                tracing::warn!(tables = ?missing, "Readiness check: tables missing");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Readiness check: schema lookup failed");
                false
            }
        };

    Json(ReadyResponse {
        ready: db_ok && schema_ok,
        database: db_ok,
        schema: schema_ok,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
