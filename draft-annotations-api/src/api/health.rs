//! Health and good-to-go endpoints
//!
//! Each outbound dependency is probed in turn; the service is good to go only
//! when all of them are.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Result of probing one dependency
#[derive(Debug, Serialize)]
pub struct DependencyCheck {
    pub name: String,
    pub endpoint: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" or "degraded"
    pub status: String,
    /// Module name ("draft-annotations-api")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    pub checks: Vec<DependencyCheck>,
}

fn check<E: std::fmt::Display>(name: &str, endpoint: &str, result: Result<(), E>) -> DependencyCheck {
    DependencyCheck {
        name: name.to_string(),
        endpoint: endpoint.to_string(),
        ok: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
    }
}

async fn run_checks(state: &AppState) -> Vec<DependencyCheck> {
    vec![
        check(
            "annotations-rw",
            state.annotations_rw.endpoint(),
            state.annotations_rw.gtg().await,
        ),
        check(
            "upp-public-annotations",
            state.upp_annotations.endpoint(),
            state.upp_annotations.gtg().await,
        ),
        check(
            "concept-read",
            state.concept_read.endpoint(),
            state.concept_read.gtg().await,
        ),
    ]
}

/// GET /__health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let checks = run_checks(&state).await;
    let status = if checks.iter().all(|c| c.ok) {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        module: "draft-annotations-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        uptime_seconds,
        checks,
    })
}

/// GET /__gtg
pub async fn good_to_go(State(state): State<AppState>) -> (StatusCode, String) {
    let failures: Vec<String> = run_checks(&state)
        .await
        .into_iter()
        .filter_map(|c| c.message.map(|m| format!("{}: {}", c.name, m)))
        .collect();

    if failures.is_empty() {
        (StatusCode::OK, "OK".to_string())
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, failures.join("\n"))
    }
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/__health", get(health_check))
        .route("/__gtg", get(good_to_go))
}
