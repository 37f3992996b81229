//! Goal handlers. Responses carry the derived `progress_percent`.

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use super::collection;
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{CreateGoal, Goal, GoalFilter, GoalResponse, UpdateGoal};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated, PaginationParams};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressQuery {
    pub current_value: f64,
}

pub fn goal_routes() -> Router<AppState> {
    collection(Router::new(), "/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/:id",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/:id/progress", patch(update_goal_progress))
        .route("/goals/user/:user_id", get(goals_by_user))
        .route("/goals/team/:team_id", get(goals_by_team))
        .route("/goals/active/all", get(active_goals))
}

fn responses(goals: Vec<Goal>) -> Vec<GoalResponse> {
    goals.into_iter().map(GoalResponse::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/goals/",
    tag = "Goals",
    request_body = CreateGoal,
    responses(
        (status = 200, description = "Goal created", body = GoalResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_goal(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateGoal>,
) -> AppResult<ApiResponse<GoalResponse>> {
    let goal = state.services.goals.create(input).await?;
    Ok(ApiResponse::with_message(goal.into(), "Goal created successfully"))
}

#[utoipa::path(
    get,
    path = "/api/goals/{id}",
    tag = "Goals",
    params(("id" = String, Path, description = "Goal id")),
    responses(
        (status = 200, description = "Goal found", body = GoalResponse),
        (status = 404, description = "Goal not found")
    )
)]
pub async fn get_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<GoalResponse>> {
    let goal = state.services.goals.get(&id).await?;
    Ok(ApiResponse::with_message(goal.into(), "Goal retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/goals/",
    tag = "Goals",
    params(PaginationParams, GoalFilter),
    responses(
        (status = 200, description = "Page of goals", body = [GoalResponse]),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_goals(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(filter): ValidatedQuery<GoalFilter>,
) -> AppResult<Paginated<GoalResponse>> {
    let (goals, total) = state.services.goals.list(&filter, &params).await?;
    Ok(Paginated::new(goals, total, &params, "Goals retrieved successfully").map(GoalResponse::from))
}

#[utoipa::path(
    put,
    path = "/api/goals/{id}",
    tag = "Goals",
    params(("id" = String, Path, description = "Goal id")),
    request_body = UpdateGoal,
    responses(
        (status = 200, description = "Goal updated", body = GoalResponse),
        (status = 404, description = "Goal not found")
    )
)]
pub async fn update_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateGoal>,
) -> AppResult<ApiResponse<GoalResponse>> {
    let goal = state.services.goals.update(&id, input).await?;
    Ok(ApiResponse::with_message(goal.into(), "Goal updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/goals/{id}",
    tag = "Goals",
    params(("id" = String, Path, description = "Goal id")),
    responses(
        (status = 200, description = "Goal deleted"),
        (status = 404, description = "Goal not found")
    )
)]
pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.services.goals.delete(&id).await?;
    Ok(ApiResponse::message("Goal deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/goals/user/{user_id}",
    tag = "Goals",
    params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, description = "Goals of the user", body = [GoalResponse]))
)]
pub async fn goals_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<GoalResponse>>> {
    let goals = state.services.goals.by_user(&user_id).await?;
    Ok(ApiResponse::with_message(responses(goals), "Goals retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/goals/team/{team_id}",
    tag = "Goals",
    params(("team_id" = String, Path, description = "Team id")),
    responses((status = 200, description = "Goals of the team", body = [GoalResponse]))
)]
pub async fn goals_by_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> AppResult<ApiResponse<Vec<GoalResponse>>> {
    let goals = state.services.goals.by_team(&team_id).await?;
    Ok(ApiResponse::with_message(responses(goals), "Goals retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/goals/active/all",
    tag = "Goals",
    responses((status = 200, description = "Active goals", body = [GoalResponse]))
)]
pub async fn active_goals(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<GoalResponse>>> {
    let goals = state.services.goals.active().await?;
    Ok(ApiResponse::with_message(responses(goals), "Active goals retrieved successfully"))
}

#[utoipa::path(
    patch,
    path = "/api/goals/{id}/progress",
    tag = "Goals",
    params(("id" = String, Path, description = "Goal id"), ProgressQuery),
    responses(
        (status = 200, description = "Progress updated", body = GoalResponse),
        (status = 404, description = "Goal not found")
    )
)]
pub async fn update_goal_progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<ProgressQuery>,
) -> AppResult<ApiResponse<GoalResponse>> {
    let goal = state
        .services
        .goals
        .update_progress(&id, query.current_value)
        .await?;
    Ok(ApiResponse::with_message(goal.into(), "Goal progress updated successfully"))
}
