//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    attendance_handler, auth_handler, customer_handler, goal_handler, health_handler,
    monitoring_handler, schedule_handler, ticket_handler, user_handler,
};
use crate::domain::{
    Attendance, AttendanceStatus, Channel, CreateAttendance, CreateCustomer, CreateGoal,
    CreateMetric, CreateSchedule, CreateTicket, CreateUser, Customer, Dashboard, DashboardTotals,
    Goal, GoalResponse, MonitoringMetric, Schedule, Ticket, TicketPriority, TicketStatus,
    UpdateAttendance, UpdateCustomer, UpdateGoal, UpdateSchedule, UpdateTicket, UpdateUser,
    UserResponse, UserRole, UserStatus,
};
use crate::services::TokenResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRM API",
        version = "0.1.0",
        description = "Agents, customers, support tickets, goals, attendance, monitoring and team shifts",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8001", description = "Local development server")
    ),
    paths(
        health_handler::root,
        health_handler::health,
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::list_users,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::get_user_by_email,
        user_handler::update_user_status,
        user_handler::list_users_by_role,
        user_handler::list_active_users,
        customer_handler::create_customer,
        customer_handler::get_customer,
        customer_handler::list_customers,
        customer_handler::update_customer,
        customer_handler::delete_customer,
        customer_handler::get_customer_by_email,
        customer_handler::get_customer_by_phone,
        customer_handler::search_customers,
        ticket_handler::create_ticket,
        ticket_handler::get_ticket,
        ticket_handler::list_tickets,
        ticket_handler::update_ticket,
        ticket_handler::delete_ticket,
        ticket_handler::tickets_by_customer,
        ticket_handler::tickets_by_assignee,
        ticket_handler::tickets_by_status,
        ticket_handler::assign_ticket,
        ticket_handler::resolve_ticket,
        ticket_handler::rate_ticket,
        goal_handler::create_goal,
        goal_handler::get_goal,
        goal_handler::list_goals,
        goal_handler::update_goal,
        goal_handler::delete_goal,
        goal_handler::goals_by_user,
        goal_handler::goals_by_team,
        goal_handler::active_goals,
        goal_handler::update_goal_progress,
        attendance_handler::create_attendance,
        attendance_handler::get_attendance,
        attendance_handler::list_attendance,
        attendance_handler::update_attendance,
        attendance_handler::delete_attendance,
        attendance_handler::attendance_by_user,
        attendance_handler::attendance_by_user_and_date,
        attendance_handler::check_in,
        attendance_handler::check_out,
        monitoring_handler::create_metric,
        monitoring_handler::get_metric,
        monitoring_handler::list_metrics,
        monitoring_handler::delete_metric,
        monitoring_handler::metrics_by_category,
        monitoring_handler::metrics_by_user,
        monitoring_handler::metrics_by_time_range,
        monitoring_handler::latest_metrics,
        monitoring_handler::dashboard,
        schedule_handler::create_schedule,
        schedule_handler::get_schedule,
        schedule_handler::list_schedules,
        schedule_handler::update_schedule,
        schedule_handler::delete_schedule,
        schedule_handler::schedules_by_user,
        schedule_handler::active_schedules,
    ),
    components(
        schemas(
            UserRole,
            UserStatus,
            UserResponse,
            CreateUser,
            UpdateUser,
            Customer,
            CreateCustomer,
            UpdateCustomer,
            TicketStatus,
            TicketPriority,
            Channel,
            Ticket,
            CreateTicket,
            UpdateTicket,
            Goal,
            GoalResponse,
            CreateGoal,
            UpdateGoal,
            AttendanceStatus,
            Attendance,
            CreateAttendance,
            UpdateAttendance,
            MonitoringMetric,
            CreateMetric,
            Dashboard,
            DashboardTotals,
            Schedule,
            CreateSchedule,
            UpdateSchedule,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            health_handler::Banner,
            health_handler::HealthResponse,
            health_handler::ServiceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Banner and health check"),
        (name = "Authentication", description = "Registration, login and token identity"),
        (name = "Users", description = "Agents and their status"),
        (name = "Customers", description = "Customer records and search"),
        (name = "Tickets", description = "Support tickets"),
        (name = "Goals", description = "Targets and progress"),
        (name = "Attendance", description = "Daily attendance and check-in"),
        (name = "Monitoring", description = "Metrics and dashboard"),
        (name = "Schedules", description = "Team shifts (bearer token required)")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
