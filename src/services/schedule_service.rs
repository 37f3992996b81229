//! Schedule service - team shifts.

use super::UserService;
use crate::domain::{CreateSchedule, Schedule, ScheduleFilter, UpdateSchedule};
use crate::errors::AppResult;
use crate::infra::{Filter, Query, Repository};
use crate::types::PaginationParams;

#[derive(Clone)]
pub struct ScheduleService {
    schedules: Repository<Schedule>,
    users: UserService,
}

impl ScheduleService {
    pub fn new(schedules: Repository<Schedule>, users: UserService) -> Self {
        Self { schedules, users }
    }

    fn query(filter: &ScheduleFilter) -> Query {
        Query::new()
            .eq_opt("user_id", filter.user_id.as_deref())
            .eq_opt("is_active", filter.is_active)
    }

    /// Create a shift for an existing user.
    pub async fn create(&self, input: CreateSchedule) -> AppResult<Schedule> {
        input.check()?;
        self.users.get(&input.user_id).await?;
        self.schedules.create(&Schedule::new(input)).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Schedule> {
        self.schedules.require(id).await
    }

    pub async fn list(
        &self,
        filter: &ScheduleFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Schedule>, u64)> {
        self.schedules.page(params, &Self::query(filter)).await
    }

    pub async fn update(&self, id: &str, input: UpdateSchedule) -> AppResult<Schedule> {
        input.check()?;
        self.schedules.update_existing(id, &input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.schedules.delete_existing(id).await
    }

    pub async fn by_user(&self, user_id: &str) -> AppResult<Vec<Schedule>> {
        self.schedules
            .find_by(&Query::new().filter(Filter::eq("user_id", user_id)))
            .await
    }

    pub async fn active(&self) -> AppResult<Vec<Schedule>> {
        self.schedules
            .find_by(&Query::new().filter(Filter::eq("is_active", true)))
            .await
    }
}
