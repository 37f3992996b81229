//! Banner and health check.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, ToSchema)]
pub struct Banner {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(with = "crate::utils::timestamp")]
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub database: ServiceStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/",
    tag = "Health",
    responses((status = 200, description = "Service banner", body = Banner))
)]
pub async fn root() -> Json<Banner> {
    Json(Banner {
        message: format!("CRM API v{VERSION}"),
    })
}

/// Health check backed by a store ping
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.store.ping().await {
        Ok(()) => ServiceStatus {
            status: "healthy".into(),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            ServiceStatus {
                status: "unhealthy".into(),
                error: Some(e.to_string()),
            }
        }
    };

    let healthy = database.error.is_none();
    let response = HealthResponse {
        status: (if healthy { "healthy" } else { "unhealthy" }).to_string(),
        timestamp: Utc::now(),
        version: VERSION.into(),
        database,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
