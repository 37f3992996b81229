//! Authentication service - registration, login and bearer tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{CreateUser, Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::Repository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Registration input after request validation
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account with a hashed password.
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify a bearer token and extract its claims.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Load the account a token was issued for.
    async fn current_user(&self, claims: &Claims) -> AppResult<User>;
}

/// `AuthService` backed by the users collection.
pub struct Authenticator {
    users: Repository<User>,
    config: Config,
}

impl Authenticator {
    pub fn new(users: Repository<User>, config: Config) -> Self {
        Self { users, config }
    }

    fn issue_token(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        if self
            .users
            .find_one_by("email", registration.email.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::already_exists("Email"));
        }

        let hash = Password::new(&registration.password)?.into_string();
        let user = User::new(CreateUser {
            name: registration.name,
            email: registration.email,
            role: registration.role,
            phone: None,
            department: None,
            avatar_url: None,
            skills: Vec::new(),
        })
        .with_password_hash(hash);

        let user = self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse> {
        let user = self.users.find_one_by("email", email).await?;

        // Verify even for unknown emails so both failures cost the same.
        let stored = Password::from_stored(
            user.as_ref().and_then(|u| u.password_hash.as_deref()),
        );
        let verified = stored.verify(password);

        match user {
            Some(user) if verified && user.is_active => self.issue_token(&user),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }

    async fn current_user(&self, claims: &Claims) -> AppResult<User> {
        self.users
            .get_by_id(&claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
