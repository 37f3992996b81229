//! User (agent) entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_true, Entity};
use crate::config::COLLECTION_USERS;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Agent,
    Supervisor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Agent => "agent",
            UserRole::Supervisor => "supervisor",
        }
    }

    /// Roles allowed to create and change team shifts.
    pub fn can_manage_schedules(&self) -> bool {
        !matches!(self, UserRole::Agent)
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "agent" => Ok(UserRole::Agent),
            "supervisor" => Ok(UserRole::Supervisor),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Busy,
    #[default]
    Available,
    Break,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Busy => "busy",
            UserStatus::Available => "available",
            UserStatus::Break => "break",
        }
    }
}

/// User domain entity as stored.
///
/// `password_hash` is only present for accounts created through
/// registration and never leaves the service layer; respond with
/// [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub schedule_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(with = "crate::utils::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    const COLLECTION: &'static str = COLLECTION_USERS;
    const NAME: &'static str = "User";
}

impl User {
    /// Build a new, not yet persisted user. The id is assigned on insert.
    pub fn new(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: input.name,
            email: input.email,
            role: input.role,
            status: UserStatus::default(),
            phone: input.phone,
            department: input.department,
            avatar_url: input.avatar_url,
            skills: input.skills,
            schedule_id: None,
            is_active: true,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_password_hash(mut self, hash: String) -> Self {
        self.password_hash = Some(hash);
        self
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Partial user update; only supplied fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// List filters for users
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub avatar_url: Option<String>,
    pub skills: Vec<String>,
    pub schedule_id: Option<String>,
    pub is_active: bool,
    #[serde(with = "crate::utils::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            phone: user.phone,
            department: user.department,
            avatar_url: user.avatar_url,
            skills: user.skills,
            schedule_id: user.schedule_id,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_input() -> CreateUser {
        serde_json::from_value(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "role": "agent"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(create_input());

        assert_eq!(user.status, UserStatus::Available);
        assert!(user.is_active);
        assert!(user.skills.is_empty());
        assert!(user.id.is_empty());
    }

    #[test]
    fn test_password_hash_hidden_from_response() {
        let user = User::new(create_input()).with_password_hash("$argon2id$hash".into());
        let body = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(body.get("password_hash").is_none());
        assert_eq!(body["role"], "agent");
    }

    #[test]
    fn test_update_serializes_only_supplied_fields() {
        let update = UpdateUser {
            status: Some(UserStatus::Break),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"status": "break"}));
    }

    #[test]
    fn test_schedule_permissions() {
        assert!(UserRole::Admin.can_manage_schedules());
        assert!(UserRole::Manager.can_manage_schedules());
        assert!(UserRole::Supervisor.can_manage_schedules());
        assert!(!UserRole::Agent.can_manage_schedules());
        assert_eq!("supervisor".parse::<UserRole>().unwrap(), UserRole::Supervisor);
    }
}
