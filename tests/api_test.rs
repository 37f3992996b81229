//! Integration tests for API endpoints.
//!
//! Every test drives the real router against the in-memory document store,
//! so no PostgreSQL instance is needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crm_api::api::{create_router, AppState};
use crm_api::config::Config;
use crm_api::infra::MemoryStore;

const JWT_SECRET: &str = "integration-test-secret-with-32-chars";

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    let config = Config::new("memory://", JWT_SECRET).expect("valid test config");
    create_router(AppState::new(Arc::new(MemoryStore::new()), config))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body), None).await
}

async fn create_customer(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = post(
        app,
        "/api/customers/",
        json!({"name": name, "email": email, "company": "Etiquetas Ltda"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn register_and_login(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = post(
        app,
        "/api/auth/register",
        json!({"name": "Shift Owner", "email": email, "password": "correct-horse", "role": role}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = post(
        app,
        "/api/auth/login",
        json!({"email": email, "password": "correct-horse"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["access_token"].as_str().unwrap().to_string()
}

// =============================================================================
// Banner & Health
// =============================================================================

#[tokio::test]
async fn test_banner_and_health() {
    let app = app();

    let (status, body) = get(&app, "/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().starts_with("CRM API v"));

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_duplicate_user_email_rejected() {
    let app = app();
    let user = json!({"name": "Ana", "email": "ana@example.com", "role": "agent"});

    let (status, body) = post(&app, "/api/users/", user.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["status"], "available");
    assert_eq!(body["data"]["is_active"], true);

    let (status, body) = post(&app, "/api/users", user).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn test_user_update_keeps_unmentioned_fields() {
    let app = app();
    let (_, created) = post(
        &app,
        "/api/users/",
        json!({"name": "Bia", "email": "bia@example.com", "role": "manager", "department": "Sales"}),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{id}"),
        Some(json!({"phone": "+55 11 5555-0000"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone"], "+55 11 5555-0000");
    assert_eq!(body["data"]["department"], "Sales");
    assert_eq!(body["data"]["id"], id);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{id}/status?status=busy"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "busy");
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = app();

    let (status, body) = get(&app, "/api/users/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = send(&app, Method::DELETE, "/api/goals/missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Goal not found");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/tickets/missing",
        Some(json!({"title": "x"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Customers & Pagination
// =============================================================================

#[tokio::test]
async fn test_pagination_envelope() {
    let app = app();
    for i in 0..3 {
        create_customer(&app, &format!("Customer {i}"), &format!("c{i}@example.com")).await;
    }

    let (status, body) = get(&app, "/api/customers/?skip=2&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customers retrieved successfully");
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 2);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Customer 2");

    let (status, body) = get(&app, "/api/customers/?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_customer_search_is_case_insensitive() {
    let app = app();
    create_customer(&app, "Gráfica Central", "contato@central.com").await;
    create_customer(&app, "Padaria Sol", "sol@padaria.com").await;

    let (status, body) = get(&app, "/api/customers/search/CENTRAL").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = get(&app, "/api/customers/?search=padaria&limit=10").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["name"], "Padaria Sol");
}

// =============================================================================
// Tickets
// =============================================================================

#[tokio::test]
async fn test_ticket_for_unknown_customer_is_not_persisted() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/tickets/",
        json!({
            "title": "Label printer jammed",
            "description": "Stuck since morning",
            "channel": "whatsapp",
            "customer_id": "nobody"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Customer not found");

    let (_, body) = get(&app, "/api/tickets/").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_ticket_lifecycle_and_rating_bounds() {
    let app = app();
    let customer_id = create_customer(&app, "Loja Azul", "azul@example.com").await;

    let (status, body) = post(
        &app,
        "/api/tickets/",
        json!({
            "title": "Wrong label size",
            "description": "Ordered 10x5, got 5x5",
            "channel": "email",
            "priority": "high",
            "customer_id": customer_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let ticket = &body["data"];
    let id = ticket["id"].as_str().unwrap().to_string();
    assert!(ticket["ticket_number"].as_str().unwrap().starts_with("TK-"));
    assert_eq!(ticket["status"], "open");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/tickets/{id}/rate?rating=10"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Rating must be between 1 and 5");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/tickets/{id}/resolve?resolution=Reprinted"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "resolved");
    assert_eq!(body["data"]["resolution"], "Reprinted");
    assert!(body["data"]["resolved_at"].is_string());

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/tickets/{id}/rate?rating=5&comment=Great"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["satisfaction_rating"], 5);

    let (_, body) = get(&app, "/api/tickets/status/resolved").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Goals
// =============================================================================

#[tokio::test]
async fn test_goal_progress_percent() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/goals/",
        json!({
            "title": "Close tickets",
            "target_value": 40.0,
            "unit": "tickets",
            "team_id": "support",
            "start_date": "2024-01-01T00:00:00Z",
            "end_date": "2024-01-31T00:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/goals/{id}/progress?current_value=10"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["progress_percent"], 25.0);
    assert_eq!(body["message"], "Goal progress updated successfully");
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_check_out_requires_check_in() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkout?user_id=u-1&timestamp=2024-03-15T17:00:00Z",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No check-in found for today");
}

#[tokio::test]
async fn test_check_in_then_out_computes_hours() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkin?user_id=u-1&timestamp=2024-03-15T09:00:00Z",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date"], "2024-03-15T00:00:00.000000Z");
    assert_eq!(body["data"]["status"], "present");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkout?user_id=u-1&timestamp=2024-03-15T17:30:00Z",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["hours_worked"], 8.5);

    let (status, body) = get(&app, "/api/attendance/user/u-1/date/2024-03-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["check_out"], "2024-03-15T17:30:00.000000Z");

    let (status, _) = get(&app, "/api/attendance/user/u-1/date/2024-03-16").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Monitoring
// =============================================================================

#[tokio::test]
async fn test_dashboard_groups_latest_metrics() {
    let app = app();
    for (category, at) in [
        ("performance", "2024-01-01T10:00:00Z"),
        ("performance", "2024-01-01T11:00:00Z"),
        ("volume", "2024-01-01T09:00:00Z"),
        ("other", "2024-01-01T09:00:00Z"),
    ] {
        let (status, _) = post(
            &app,
            "/api/monitoring/metrics/",
            json!({"name": "m", "value": 1.0, "unit": "u", "category": category, "timestamp": at}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    create_customer(&app, "Dash Co", "dash@example.com").await;

    let (status, body) = get(&app, "/api/monitoring/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["performance"].as_array().unwrap().len(), 2);
    assert_eq!(data["performance"][0]["timestamp"], "2024-01-01T11:00:00.000000Z");
    assert_eq!(data["quality"].as_array().unwrap().len(), 0);
    assert_eq!(data["volume"].as_array().unwrap().len(), 1);
    assert_eq!(data["totals"]["customers"], 1);

    let (_, body) = get(&app, "/api/monitoring/metrics/latest?limit=1").await;
    assert_eq!(body["data"][0]["timestamp"], "2024-01-01T11:00:00.000000Z");
}

#[tokio::test]
async fn test_latest_metrics_defaults_to_one_hundred() {
    let app = app();
    for i in 0..120 {
        let (status, _) = post(
            &app,
            "/api/monitoring/metrics/",
            json!({"name": format!("m{i}"), "value": i, "unit": "u", "category": "volume"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get(&app, "/api/monitoring/metrics/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 100);

    let (_, body) = get(&app, "/api/monitoring/metrics/latest?limit=120").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 120);
}

// =============================================================================
// Auth & Schedules
// =============================================================================

#[tokio::test]
async fn test_me_requires_token() {
    let app = app();
    let (status, body) = get(&app, "/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let token = register_and_login(&app, "me@example.com", "agent").await;
    let (status, body) = send(&app, Method::GET, "/api/auth/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "me@example.com");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = app();
    register_and_login(&app, "known@example.com", "agent").await;

    let (status, body) = post(
        &app,
        "/api/auth/login",
        json!({"email": "known@example.com", "password": "wrong-password"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_schedule_writes_require_manager_role() {
    let app = app();
    let shift = |user_id: &str| {
        json!({
            "name": "Morning",
            "user_id": user_id,
            "start_time": "08:00",
            "end_time": "14:00",
            "days_of_week": [0, 1, 2, 3, 4]
        })
    };

    let (status, _) = post(&app, "/api/schedules/", shift("anyone")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let agent = register_and_login(&app, "agent@example.com", "agent").await;
    let (status, body) = send(&app, Method::POST, "/api/schedules/", Some(shift("anyone")), Some(&agent)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let supervisor = register_and_login(&app, "lead@example.com", "supervisor").await;
    let (_, me) = send(&app, Method::GET, "/api/auth/me", None, Some(&supervisor)).await;
    let user_id = me["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::POST, "/api/schedules", Some(shift(&user_id)), Some(&supervisor)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["start_time"], "08:00");

    let (status, _) = send(&app, Method::POST, "/api/schedules", Some(shift("ghost")), Some(&supervisor)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut bad = shift(&user_id);
    bad["end_time"] = json!("25:00");
    let (status, _) = send(&app, Method::POST, "/api/schedules", Some(bad), Some(&supervisor)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/schedules/active/all", None, Some(&agent)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
