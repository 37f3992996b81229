//! User (agent) handlers.

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
use crate::domain::{CreateUser, UpdateUser, UserFilter, UserResponse, UserStatus};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated, PaginationParams};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub status: UserStatus,
}

pub fn user_routes() -> Router<AppState> {
    collection(Router::new(), "/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/status", patch(update_user_status))
        .route("/users/email/:email", get(get_user_by_email))
        .route("/users/role/:role", get(list_users_by_role))
        .route("/users/active/all", get(list_active_users))
}

fn responses(users: Vec<crate::domain::User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/users/",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error or email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.create(input).await?;
    Ok(ApiResponse::with_message(user.into(), "User created successfully"))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.get(&id).await?;
    Ok(ApiResponse::with_message(user.into(), "User retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/users/",
    tag = "Users",
    params(PaginationParams, UserFilter),
    responses(
        (status = 200, description = "Page of users", body = [UserResponse]),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(filter): ValidatedQuery<UserFilter>,
) -> AppResult<Paginated<UserResponse>> {
    let (users, total) = state.services.users.list(&filter, &params).await?;
    Ok(Paginated::new(responses(users), total, &params, "Users retrieved successfully"))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Email already exists"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.update(&id, input).await?;
    Ok(ApiResponse::with_message(user.into(), "User updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.services.users.delete(&id).await?;
    Ok(ApiResponse::message("User deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/users/email/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email address")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.get_by_email(&email).await?;
    Ok(ApiResponse::with_message(user.into(), "User retrieved successfully"))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    tag = "Users",
    params(("id" = String, Path, description = "User id"), StatusQuery),
    responses(
        (status = 200, description = "Status changed", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<StatusQuery>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.set_status(&id, query.status).await?;
    Ok(ApiResponse::with_message(user.into(), "User status updated successfully"))
}

#[utoipa::path(
    get,
    path = "/api/users/role/{role}",
    tag = "Users",
    params(("role" = String, Path, description = "admin, manager, agent or supervisor")),
    responses((status = 200, description = "Users with the role", body = [UserResponse]))
)]
pub async fn list_users_by_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.services.users.list_by_role(&role).await?;
    Ok(ApiResponse::with_message(responses(users), "Users retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/users/active/all",
    tag = "Users",
    responses((status = 200, description = "Active users", body = [UserResponse]))
)]
pub async fn list_active_users(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.services.users.list_active().await?;
    Ok(ApiResponse::with_message(responses(users), "Active users retrieved successfully"))
}
