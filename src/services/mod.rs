//! Application services layer - use cases on top of the repositories.
//!
//! Each CRM entity gets a concrete service wrapping a `Repository`.
//! Authentication sits behind the `AuthService` trait so handlers can be
//! tested with a mock.

mod attendance_service;
mod auth_service;
pub mod container;
mod customer_service;
mod goal_service;
mod monitoring_service;
mod schedule_service;
mod ticket_service;
mod user_service;

pub use container::Services;

pub use attendance_service::AttendanceService;
pub use auth_service::{AuthService, Authenticator, Claims, Registration, TokenResponse};
pub use customer_service::CustomerService;
pub use goal_service::GoalService;
pub use monitoring_service::MonitoringService;
pub use schedule_service::ScheduleService;
pub use ticket_service::TicketService;
pub use user_service::UserService;

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
