//! Attendance handlers, including daily check-in and check-out.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use super::collection;
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{Attendance, AttendanceFilter, CreateAttendance, UpdateAttendance};
use crate::errors::{AppResult, OptionExt};
use crate::types::{ApiResponse, Paginated, PaginationParams};

/// `user_id` plus an optional RFC 3339 instant (defaults to now)
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClockQuery {
    pub user_id: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

pub fn attendance_routes() -> Router<AppState> {
    collection(
        Router::new(),
        "/attendance",
        get(list_attendance).post(create_attendance),
    )
    .route(
        "/attendance/:id",
        get(get_attendance)
            .put(update_attendance)
            .delete(delete_attendance),
    )
    .route("/attendance/user/:user_id", get(attendance_by_user))
    .route("/attendance/user/:user_id/date/:date", get(attendance_by_user_and_date))
    .route("/attendance/checkin", post(check_in))
    .route("/attendance/checkout", post(check_out))
}

#[utoipa::path(
    post,
    path = "/api/attendance/",
    tag = "Attendance",
    request_body = CreateAttendance,
    responses(
        (status = 200, description = "Record created", body = Attendance),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_attendance(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateAttendance>,
) -> AppResult<ApiResponse<Attendance>> {
    let record = state.services.attendance.create(input).await?;
    Ok(ApiResponse::with_message(record, "Attendance created successfully"))
}

#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    params(("id" = String, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Record found", body = Attendance),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Attendance>> {
    let record = state.services.attendance.get(&id).await?;
    Ok(ApiResponse::with_message(record, "Attendance retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/attendance/",
    tag = "Attendance",
    params(PaginationParams, AttendanceFilter),
    responses(
        (status = 200, description = "Page of records", body = [Attendance]),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_attendance(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(filter): ValidatedQuery<AttendanceFilter>,
) -> AppResult<Paginated<Attendance>> {
    let (records, total) = state.services.attendance.list(&filter, &params).await?;
    Ok(Paginated::new(
        records,
        total,
        &params,
        "Attendance records retrieved successfully",
    ))
}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    params(("id" = String, Path, description = "Attendance id")),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Record updated", body = Attendance),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateAttendance>,
) -> AppResult<ApiResponse<Attendance>> {
    let record = state.services.attendance.update(&id, input).await?;
    Ok(ApiResponse::with_message(record, "Attendance updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    params(("id" = String, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.services.attendance.delete(&id).await?;
    Ok(ApiResponse::message("Attendance deleted successfully"))
}

/// A user's records. The date range applies only when both ends are given.
#[utoipa::path(
    get,
    path = "/api/attendance/user/{user_id}",
    tag = "Attendance",
    params(("user_id" = String, Path, description = "User id"), DateRangeQuery),
    responses((status = 200, description = "Records of the user", body = [Attendance]))
)]
pub async fn attendance_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<ApiResponse<Vec<Attendance>>> {
    let records = state
        .services
        .attendance
        .by_user(&user_id, range.date_from, range.date_to)
        .await?;
    Ok(ApiResponse::with_message(records, "Attendance records retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/attendance/user/{user_id}/date/{date}",
    tag = "Attendance",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("date" = String, Path, description = "Day as YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Record of the day", body = Attendance),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn attendance_by_user_and_date(
    State(state): State<AppState>,
    Path((user_id, date)): Path<(String, NaiveDate)>,
) -> AppResult<ApiResponse<Attendance>> {
    let record = state
        .services
        .attendance
        .by_user_and_day(&user_id, date)
        .await?
        .ok_or_not_found("Attendance")?;
    Ok(ApiResponse::with_message(record, "Attendance retrieved successfully"))
}

#[utoipa::path(
    post,
    path = "/api/attendance/checkin",
    tag = "Attendance",
    params(ClockQuery),
    responses((status = 200, description = "Check-in recorded", body = Attendance))
)]
pub async fn check_in(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ClockQuery>,
) -> AppResult<ApiResponse<Attendance>> {
    let record = state
        .services
        .attendance
        .check_in(&query.user_id, query.timestamp)
        .await?;
    Ok(ApiResponse::with_message(record, "Check-in successful"))
}

#[utoipa::path(
    post,
    path = "/api/attendance/checkout",
    tag = "Attendance",
    params(ClockQuery),
    responses(
        (status = 200, description = "Check-out recorded", body = Attendance),
        (status = 404, description = "No check-in found for today")
    )
)]
pub async fn check_out(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ClockQuery>,
) -> AppResult<ApiResponse<Attendance>> {
    let record = state
        .services
        .attendance
        .check_out(&query.user_id, query.timestamp)
        .await?;
    Ok(ApiResponse::with_message(record, "Check-out successful"))
}
