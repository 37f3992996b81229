//! HTTP request handlers, one module per resource.

use axum::routing::MethodRouter;
use axum::Router;

use super::AppState;

pub mod attendance_handler;
pub mod auth_handler;
pub mod customer_handler;
pub mod goal_handler;
pub mod health_handler;
pub mod monitoring_handler;
pub mod schedule_handler;
pub mod ticket_handler;
pub mod user_handler;

pub use attendance_handler::attendance_routes;
pub use auth_handler::{auth_routes, protected_auth_routes};
pub use customer_handler::customer_routes;
pub use goal_handler::goal_routes;
pub use health_handler::{health, root};
pub use monitoring_handler::monitoring_routes;
pub use schedule_handler::schedule_routes;
pub use ticket_handler::ticket_routes;
pub use user_handler::user_routes;

/// Register a collection path both with and without a trailing slash.
fn collection(
    router: Router<AppState>,
    path: &str,
    methods: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, methods.clone())
        .route(&format!("{path}/"), methods)
}
