//! Domain layer - Core business entities and logic
//!
//! This module contains the CRM entities, their request DTOs and the
//! value objects they rely on. It depends on nothing but serde, chrono and
//! the shared error types.

pub mod attendance;
pub mod customer;
pub mod goal;
pub mod metric;
pub mod password;
pub mod schedule;
pub mod ticket;
pub mod user;

use serde::{de::DeserializeOwned, Serialize};

pub use attendance::{Attendance, AttendanceFilter, AttendanceStatus, CreateAttendance, UpdateAttendance};
pub use customer::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
pub use goal::{CreateGoal, Goal, GoalFilter, GoalResponse, UpdateGoal};
pub use metric::{CreateMetric, Dashboard, DashboardTotals, MetricFilter, MonitoringMetric};
pub use password::Password;
pub use schedule::{CreateSchedule, Schedule, ScheduleFilter, UpdateSchedule};
pub use ticket::{Channel, CreateTicket, Ticket, TicketFilter, TicketPriority, TicketStatus, UpdateTicket};
pub use user::{CreateUser, UpdateUser, User, UserFilter, UserResponse, UserRole, UserStatus};

/// A type persisted as documents in one collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the documents live in.
    const COLLECTION: &'static str;
    /// Human-readable name used in "not found" messages.
    const NAME: &'static str;
}

pub(crate) fn default_true() -> bool {
    true
}
