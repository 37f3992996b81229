//! Application route configuration.

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    attendance_routes, auth_routes, customer_routes, goal_routes, health, monitoring_routes,
    protected_auth_routes, root, schedule_routes, ticket_routes, user_routes,
};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Bearer token required
    let protected = Router::new()
        .merge(schedule_routes())
        .merge(protected_auth_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .route("/health", get(health))
        .merge(user_routes())
        .merge(customer_routes())
        .merge(ticket_routes())
        .merge(goal_routes())
        .merge(attendance_routes())
        .merge(monitoring_routes())
        .merge(auth_routes())
        .merge(protected);

    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::domain::{CreateUser, User, UserRole};
    use crate::errors::AppError;
    use crate::infra::{DocumentStore, MockDocumentStore};
    use crate::services::{Claims, MockAuthService, Services};

    /// Router whose store has no expectations, so any store call panics.
    fn app_with(auth: MockAuthService) -> Router {
        let store: Arc<dyn DocumentStore> = Arc::new(MockDocumentStore::new());
        let config = Config::new("memory://", "a-test-secret-that-is-at-least-32-chars").unwrap();
        let mut services = Services::new(store.clone(), config);
        services.auth = Arc::new(auth);
        create_router(AppState::with_services(services, store))
    }

    fn claims(role: UserRole) -> Claims {
        Claims {
            sub: "u-1".into(),
            email: "ana@example.com".into(),
            role,
            exp: 4_102_444_800,
            iat: 1_700_000_000,
        }
    }

    fn request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer some-token");
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap()
    }

    #[tokio::test]
    async fn test_rejected_token_never_reaches_the_store() {
        let mut auth = MockAuthService::new();
        auth.expect_verify_token()
            .times(1)
            .returning(|_| Err(AppError::Unauthorized));

        let response = app_with(auth)
            .oneshot(request(Method::GET, "/api/auth/me", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_agent_cannot_create_schedule() {
        let mut auth = MockAuthService::new();
        auth.expect_verify_token()
            .returning(|_| Ok(claims(UserRole::Agent)));

        let body = json!({
            "name": "Morning",
            "user_id": "u-2",
            "start_time": "08:00",
            "end_time": "16:00",
            "days_of_week": [1, 2, 3]
        });
        let response = app_with(auth)
            .oneshot(request(Method::POST, "/api/schedules/", Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_me_returns_account_from_auth_service() {
        let mut account = User::new(CreateUser {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: UserRole::Supervisor,
            phone: None,
            department: None,
            avatar_url: None,
            skills: Vec::new(),
        });
        account.id = "u-1".into();

        let mut auth = MockAuthService::new();
        auth.expect_verify_token()
            .returning(|_| Ok(claims(UserRole::Supervisor)));
        auth.expect_current_user()
            .withf(|claims| claims.sub == "u-1")
            .returning(move |_| Ok(account.clone()));

        let response = app_with(auth)
            .oneshot(request(Method::GET, "/api/auth/me", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["id"], "u-1");
        assert_eq!(body["data"]["role"], "supervisor");
    }
}
