//! Support ticket handlers.

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
use crate::domain::{CreateTicket, Ticket, TicketFilter, UpdateTicket};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, Paginated, PaginationParams};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolveQuery {
    pub resolution: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RateQuery {
    /// Satisfaction score from 1 to 5
    pub rating: i64,
    pub comment: Option<String>,
}

pub fn ticket_routes() -> Router<AppState> {
    collection(Router::new(), "/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/tickets/:id",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route("/tickets/:id/assign", patch(assign_ticket))
        .route("/tickets/:id/resolve", patch(resolve_ticket))
        .route("/tickets/:id/rate", patch(rate_ticket))
        .route("/tickets/customer/:customer_id", get(tickets_by_customer))
        .route("/tickets/assignee/:user_id", get(tickets_by_assignee))
        .route("/tickets/status/:status", get(tickets_by_status))
}

#[utoipa::path(
    post,
    path = "/api/tickets/",
    tag = "Tickets",
    request_body = CreateTicket,
    responses(
        (status = 200, description = "Ticket created", body = Ticket),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTicket>,
) -> AppResult<ApiResponse<Ticket>> {
    let ticket = state.services.tickets.create(input).await?;
    Ok(ApiResponse::with_message(ticket, "Ticket created successfully"))
}

#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Ticket found", body = Ticket),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Ticket>> {
    let ticket = state.services.tickets.get(&id).await?;
    Ok(ApiResponse::with_message(ticket, "Ticket retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/tickets/",
    tag = "Tickets",
    params(PaginationParams, TicketFilter),
    responses(
        (status = 200, description = "Page of tickets", body = [Ticket]),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(filter): ValidatedQuery<TicketFilter>,
) -> AppResult<Paginated<Ticket>> {
    let (tickets, total) = state.services.tickets.list(&filter, &params).await?;
    Ok(Paginated::new(tickets, total, &params, "Tickets retrieved successfully"))
}

#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket id")),
    request_body = UpdateTicket,
    responses(
        (status = 200, description = "Ticket updated", body = Ticket),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTicket>,
) -> AppResult<ApiResponse<Ticket>> {
    let ticket = state.services.tickets.update(&id, input).await?;
    Ok(ApiResponse::with_message(ticket, "Ticket updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Ticket deleted"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.services.tickets.delete(&id).await?;
    Ok(ApiResponse::message("Ticket deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/tickets/customer/{customer_id}",
    tag = "Tickets",
    params(("customer_id" = String, Path, description = "Customer id")),
    responses((status = 200, description = "Tickets of the customer", body = [Ticket]))
)]
pub async fn tickets_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> AppResult<ApiResponse<Vec<Ticket>>> {
    let tickets = state.services.tickets.by_customer(&customer_id).await?;
    Ok(ApiResponse::with_message(tickets, "Tickets retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/tickets/assignee/{user_id}",
    tag = "Tickets",
    params(("user_id" = String, Path, description = "Assigned user id")),
    responses((status = 200, description = "Tickets assigned to the user", body = [Ticket]))
)]
pub async fn tickets_by_assignee(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<Ticket>>> {
    let tickets = state.services.tickets.by_assignee(&user_id).await?;
    Ok(ApiResponse::with_message(tickets, "Tickets retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/tickets/status/{status}",
    tag = "Tickets",
    params(("status" = String, Path, description = "open, in_progress, resolved, closed or escalated")),
    responses((status = 200, description = "Tickets in the status", body = [Ticket]))
)]
pub async fn tickets_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<ApiResponse<Vec<Ticket>>> {
    let tickets = state.services.tickets.by_status(&status).await?;
    Ok(ApiResponse::with_message(tickets, "Tickets retrieved successfully"))
}

#[utoipa::path(
    patch,
    path = "/api/tickets/{id}/assign",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket id"), AssignQuery),
    responses(
        (status = 200, description = "Ticket assigned", body = Ticket),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn assign_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<AssignQuery>,
) -> AppResult<ApiResponse<Ticket>> {
    let ticket = state.services.tickets.assign(&id, &query.user_id).await?;
    Ok(ApiResponse::with_message(ticket, "Ticket assigned successfully"))
}

#[utoipa::path(
    patch,
    path = "/api/tickets/{id}/resolve",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket id"), ResolveQuery),
    responses(
        (status = 200, description = "Ticket resolved", body = Ticket),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn resolve_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<ResolveQuery>,
) -> AppResult<ApiResponse<Ticket>> {
    let ticket = state.services.tickets.resolve(&id, &query.resolution).await?;
    Ok(ApiResponse::with_message(ticket, "Ticket resolved successfully"))
}

#[utoipa::path(
    patch,
    path = "/api/tickets/{id}/rate",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket id"), RateQuery),
    responses(
        (status = 200, description = "Ticket rated", body = Ticket),
        (status = 400, description = "Rating must be between 1 and 5"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn rate_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<RateQuery>,
) -> AppResult<ApiResponse<Ticket>> {
    let rating = u8::try_from(query.rating)
        .map_err(|_| AppError::validation("Rating must be between 1 and 5"))?;
    let ticket = state
        .services
        .tickets
        .rate(&id, rating, query.comment.as_deref())
        .await?;
    Ok(ApiResponse::with_message(ticket, "Ticket rated successfully"))
}
