//! Bearer token authentication.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::AppError;
use crate::services::Claims;

/// Identity taken from a verified bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Reject requests without a valid `Authorization: Bearer` token.
///
/// On success the verified `Claims` and the derived `CurrentUser` are
/// inserted into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth().verify_token(token)?;

    request.extensions_mut().insert(CurrentUser::from(claims.clone()));
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Shift schedules may only be changed by admins, managers and supervisors.
pub fn require_schedule_manager(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.can_manage_schedules() {
        Ok(())
    } else {
        tracing::debug!(user_id = %user.id, role = %user.role, "schedule write denied");
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: "u-1".into(),
            email: "someone@example.com".into(),
            role,
        }
    }

    #[test]
    fn test_schedule_managers() {
        assert!(require_schedule_manager(&user(UserRole::Admin)).is_ok());
        assert!(require_schedule_manager(&user(UserRole::Manager)).is_ok());
        assert!(require_schedule_manager(&user(UserRole::Supervisor)).is_ok());
        assert!(matches!(
            require_schedule_manager(&user(UserRole::Agent)),
            Err(AppError::Forbidden)
        ));
    }
}
