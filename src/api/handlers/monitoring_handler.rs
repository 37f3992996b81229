//! Monitoring metric and dashboard handlers.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use super::collection;
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::config::DEFAULT_LATEST_METRICS;
use crate::domain::{CreateMetric, Dashboard, MetricFilter, MonitoringMetric};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated, PaginationParams};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimeRangeQuery {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LatestQuery {
    /// Number of metrics to return (1-1000, default 100)
    #[serde(default = "default_latest")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: u64,
}

fn default_latest() -> u64 {
    DEFAULT_LATEST_METRICS
}

pub fn monitoring_routes() -> Router<AppState> {
    collection(
        Router::new(),
        "/monitoring/metrics",
        get(list_metrics).post(create_metric),
    )
    .route("/monitoring/metrics/:id", get(get_metric).delete(delete_metric))
    .route("/monitoring/metrics/category/:category", get(metrics_by_category))
    .route("/monitoring/metrics/user/:user_id", get(metrics_by_user))
    .route("/monitoring/metrics/timerange", get(metrics_by_time_range))
    .route("/monitoring/metrics/latest", get(latest_metrics))
    .route("/monitoring/dashboard", get(dashboard))
}

#[utoipa::path(
    post,
    path = "/api/monitoring/metrics/",
    tag = "Monitoring",
    request_body = CreateMetric,
    responses(
        (status = 200, description = "Metric recorded", body = MonitoringMetric),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_metric(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMetric>,
) -> AppResult<ApiResponse<MonitoringMetric>> {
    let metric = state.services.monitoring.create(input).await?;
    Ok(ApiResponse::with_message(metric, "Metric created successfully"))
}

#[utoipa::path(
    get,
    path = "/api/monitoring/metrics/{id}",
    tag = "Monitoring",
    params(("id" = String, Path, description = "Metric id")),
    responses(
        (status = 200, description = "Metric found", body = MonitoringMetric),
        (status = 404, description = "Metric not found")
    )
)]
pub async fn get_metric(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<MonitoringMetric>> {
    let metric = state.services.monitoring.get(&id).await?;
    Ok(ApiResponse::with_message(metric, "Metric retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/monitoring/metrics/",
    tag = "Monitoring",
    params(PaginationParams, MetricFilter),
    responses(
        (status = 200, description = "Page of metrics", body = [MonitoringMetric]),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_metrics(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(filter): ValidatedQuery<MetricFilter>,
) -> AppResult<Paginated<MonitoringMetric>> {
    let (metrics, total) = state.services.monitoring.list(&filter, &params).await?;
    Ok(Paginated::new(metrics, total, &params, "Metrics retrieved successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/monitoring/metrics/{id}",
    tag = "Monitoring",
    params(("id" = String, Path, description = "Metric id")),
    responses(
        (status = 200, description = "Metric deleted"),
        (status = 404, description = "Metric not found")
    )
)]
pub async fn delete_metric(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.services.monitoring.delete(&id).await?;
    Ok(ApiResponse::message("Metric deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/monitoring/metrics/category/{category}",
    tag = "Monitoring",
    params(("category" = String, Path, description = "Metric category")),
    responses((status = 200, description = "Metrics in the category", body = [MonitoringMetric]))
)]
pub async fn metrics_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<ApiResponse<Vec<MonitoringMetric>>> {
    let metrics = state.services.monitoring.by_category(&category).await?;
    Ok(ApiResponse::with_message(metrics, "Metrics retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/monitoring/metrics/user/{user_id}",
    tag = "Monitoring",
    params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, description = "Metrics of the user", body = [MonitoringMetric]))
)]
pub async fn metrics_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<MonitoringMetric>>> {
    let metrics = state.services.monitoring.by_user(&user_id).await?;
    Ok(ApiResponse::with_message(metrics, "Metrics retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/monitoring/metrics/timerange",
    tag = "Monitoring",
    params(TimeRangeQuery),
    responses((status = 200, description = "Metrics in the range", body = [MonitoringMetric]))
)]
pub async fn metrics_by_time_range(
    State(state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<TimeRangeQuery>,
) -> AppResult<ApiResponse<Vec<MonitoringMetric>>> {
    let metrics = state
        .services
        .monitoring
        .by_time_range(range.start_date, range.end_date)
        .await?;
    Ok(ApiResponse::with_message(metrics, "Metrics retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/monitoring/metrics/latest",
    tag = "Monitoring",
    params(LatestQuery),
    responses((status = 200, description = "Most recent metrics first", body = [MonitoringMetric]))
)]
pub async fn latest_metrics(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LatestQuery>,
) -> AppResult<ApiResponse<Vec<MonitoringMetric>>> {
    let metrics = state.services.monitoring.latest(query.limit).await?;
    Ok(ApiResponse::with_message(metrics, "Latest metrics retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/monitoring/dashboard",
    tag = "Monitoring",
    responses((status = 200, description = "Dashboard summary", body = Dashboard))
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<ApiResponse<Dashboard>> {
    let dashboard = state.services.dashboard().await?;
    Ok(ApiResponse::with_message(dashboard, "Dashboard data retrieved successfully"))
}
