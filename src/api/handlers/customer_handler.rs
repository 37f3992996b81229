//! Customer handlers.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::collection;
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated, PaginationParams};

pub fn customer_routes() -> Router<AppState> {
    collection(
        Router::new(),
        "/customers",
        get(list_customers).post(create_customer),
    )
    .route(
        "/customers/:id",
        get(get_customer).put(update_customer).delete(delete_customer),
    )
    .route("/customers/email/:email", get(get_customer_by_email))
    .route("/customers/phone/:phone", get(get_customer_by_phone))
    .route("/customers/search/:query", get(search_customers))
}

#[utoipa::path(
    post,
    path = "/api/customers/",
    tag = "Customers",
    request_body = CreateCustomer,
    responses(
        (status = 200, description = "Customer created", body = Customer),
        (status = 400, description = "Validation error or email already exists")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCustomer>,
) -> AppResult<ApiResponse<Customer>> {
    let customer = state.services.customers.create(input).await?;
    Ok(ApiResponse::with_message(customer, "Customer created successfully"))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Customer>> {
    let customer = state.services.customers.get(&id).await?;
    Ok(ApiResponse::with_message(customer, "Customer retrieved successfully"))
}

/// List customers. A `search` term takes precedence over the other filters.
#[utoipa::path(
    get,
    path = "/api/customers/",
    tag = "Customers",
    params(PaginationParams, CustomerFilter),
    responses(
        (status = 200, description = "Page of customers", body = [Customer]),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_customers(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(filter): ValidatedQuery<CustomerFilter>,
) -> AppResult<Paginated<Customer>> {
    let (customers, total) = state.services.customers.list(&filter, &params).await?;
    Ok(Paginated::new(customers, total, &params, "Customers retrieved successfully"))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "Customer id")),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "Email already exists"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateCustomer>,
) -> AppResult<ApiResponse<Customer>> {
    let customer = state.services.customers.update(&id, input).await?;
    Ok(ApiResponse::with_message(customer, "Customer updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.services.customers.delete(&id).await?;
    Ok(ApiResponse::message("Customer deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/customers/email/{email}",
    tag = "Customers",
    params(("email" = String, Path, description = "Email address")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<ApiResponse<Customer>> {
    let customer = state.services.customers.get_by_email(&email).await?;
    Ok(ApiResponse::with_message(customer, "Customer retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/customers/phone/{phone}",
    tag = "Customers",
    params(("phone" = String, Path, description = "Phone number")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> AppResult<ApiResponse<Customer>> {
    let customer = state.services.customers.get_by_phone(&phone).await?;
    Ok(ApiResponse::with_message(customer, "Customer retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/customers/search/{query}",
    tag = "Customers",
    params(("query" = String, Path, description = "Text matched against name, email and company")),
    responses((status = 200, description = "Matching customers", body = [Customer]))
)]
pub async fn search_customers(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<ApiResponse<Vec<Customer>>> {
    let customers = state.services.customers.search(&query).await?;
    Ok(ApiResponse::with_message(customers, "Customers retrieved successfully"))
}
