//! User service - agents and their availability.

use crate::domain::{CreateUser, UpdateUser, User, UserFilter, UserStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::{Filter, Query, Repository};
use crate::types::PaginationParams;

#[derive(Clone)]
pub struct UserService {
    users: Repository<User>,
}

impl UserService {
    pub fn new(users: Repository<User>) -> Self {
        Self { users }
    }

    fn query(filter: &UserFilter) -> Query {
        Query::new()
            .eq_opt("role", filter.role.map(|r| r.as_str()))
            .eq_opt("is_active", filter.is_active)
    }

    async fn ensure_email_free(&self, email: &str, except_id: Option<&str>) -> AppResult<()> {
        if self.users.exists_other("email", email, except_id).await? {
            return Err(AppError::already_exists("Email"));
        }
        Ok(())
    }

    pub async fn create(&self, input: CreateUser) -> AppResult<User> {
        self.ensure_email_free(&input.email, None).await?;
        self.users.create(&User::new(input)).await
    }

    pub async fn get(&self, id: &str) -> AppResult<User> {
        self.users.require(id).await
    }

    pub async fn list(
        &self,
        filter: &UserFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<User>, u64)> {
        self.users.page(params, &Self::query(filter)).await
    }

    pub async fn update(&self, id: &str, input: UpdateUser) -> AppResult<User> {
        self.users.require(id).await?;
        if let Some(email) = &input.email {
            self.ensure_email_free(email, Some(id)).await?;
        }
        self.users.update_existing(id, &input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.users.delete_existing(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .find_one_by("email", email)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    pub async fn set_status(&self, id: &str, status: UserStatus) -> AppResult<User> {
        let update = UpdateUser {
            status: Some(status),
            ..Default::default()
        };
        self.users.update_existing(id, &update).await
    }

    pub async fn list_by_role(&self, role: &str) -> AppResult<Vec<User>> {
        self.users
            .find_by(&Query::new().filter(Filter::eq("role", role)))
            .await
    }

    pub async fn list_active(&self) -> AppResult<Vec<User>> {
        self.users
            .find_by(&Query::new().filter(Filter::eq("is_active", true)))
            .await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.users.count(&Query::new()).await
    }
}
