//! Team shift schedule handlers.
//!
//! Every route needs a bearer token; writes additionally need a role that
//! can manage schedules.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Router,
};

use super::collection;
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::{require_schedule_manager, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateSchedule, Schedule, ScheduleFilter, UpdateSchedule};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated, PaginationParams};

pub fn schedule_routes() -> Router<AppState> {
    collection(
        Router::new(),
        "/schedules",
        get(list_schedules).post(create_schedule),
    )
    .route(
        "/schedules/:id",
        get(get_schedule).put(update_schedule).delete(delete_schedule),
    )
    .route("/schedules/user/:user_id", get(schedules_by_user))
    .route("/schedules/active/all", get(active_schedules))
}

#[utoipa::path(
    post,
    path = "/api/schedules/",
    tag = "Schedules",
    request_body = CreateSchedule,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shift created", body = Schedule),
        (status = 400, description = "Malformed shift time or weekday"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Role cannot manage schedules"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(input): ValidatedJson<CreateSchedule>,
) -> AppResult<ApiResponse<Schedule>> {
    require_schedule_manager(&user)?;
    let schedule = state.services.schedules.create(input).await?;
    tracing::info!(schedule_id = %schedule.id, created_by = %user.id, "shift created");
    Ok(ApiResponse::with_message(schedule, "Schedule created successfully"))
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    tag = "Schedules",
    params(("id" = String, Path, description = "Schedule id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shift found", body = Schedule),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Schedule>> {
    let schedule = state.services.schedules.get(&id).await?;
    Ok(ApiResponse::with_message(schedule, "Schedule retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/schedules/",
    tag = "Schedules",
    params(PaginationParams, ScheduleFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of shifts", body = [Schedule]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(filter): ValidatedQuery<ScheduleFilter>,
) -> AppResult<Paginated<Schedule>> {
    let (schedules, total) = state.services.schedules.list(&filter, &params).await?;
    Ok(Paginated::new(schedules, total, &params, "Schedules retrieved successfully"))
}

#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    tag = "Schedules",
    params(("id" = String, Path, description = "Schedule id")),
    request_body = UpdateSchedule,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shift updated", body = Schedule),
        (status = 400, description = "Malformed shift time or weekday"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Role cannot manage schedules"),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateSchedule>,
) -> AppResult<ApiResponse<Schedule>> {
    require_schedule_manager(&user)?;
    let schedule = state.services.schedules.update(&id, input).await?;
    Ok(ApiResponse::with_message(schedule, "Schedule updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "Schedules",
    params(("id" = String, Path, description = "Schedule id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shift deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Role cannot manage schedules"),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    require_schedule_manager(&user)?;
    state.services.schedules.delete(&id).await?;
    tracing::info!(schedule_id = %id, deleted_by = %user.id, "shift deleted");
    Ok(ApiResponse::message("Schedule deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/schedules/user/{user_id}",
    tag = "Schedules",
    params(("user_id" = String, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Shifts of the user", body = [Schedule]))
)]
pub async fn schedules_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<Schedule>>> {
    let schedules = state.services.schedules.by_user(&user_id).await?;
    Ok(ApiResponse::with_message(schedules, "Schedules retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/schedules/active/all",
    tag = "Schedules",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Active shifts", body = [Schedule]))
)]
pub async fn active_schedules(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Schedule>>> {
    let schedules = state.services.schedules.active().await?;
    Ok(ApiResponse::with_message(schedules, "Active schedules retrieved successfully"))
}
