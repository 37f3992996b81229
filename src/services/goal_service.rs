//! Goal service.

use crate::domain::{CreateGoal, Goal, GoalFilter, UpdateGoal};
use crate::errors::AppResult;
use crate::infra::{Filter, Query, Repository};
use crate::types::PaginationParams;

#[derive(Clone)]
pub struct GoalService {
    goals: Repository<Goal>,
}

impl GoalService {
    pub fn new(goals: Repository<Goal>) -> Self {
        Self { goals }
    }

    fn query(filter: &GoalFilter) -> Query {
        Query::new()
            .eq_opt("user_id", filter.user_id.as_deref())
            .eq_opt("team_id", filter.team_id.as_deref())
            .eq_opt("is_active", filter.is_active)
            .eq_opt("unit", filter.unit.as_deref())
    }

    pub async fn create(&self, input: CreateGoal) -> AppResult<Goal> {
        self.goals.create(&Goal::new(input)).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Goal> {
        self.goals.require(id).await
    }

    pub async fn list(
        &self,
        filter: &GoalFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Goal>, u64)> {
        self.goals.page(params, &Self::query(filter)).await
    }

    pub async fn update(&self, id: &str, input: UpdateGoal) -> AppResult<Goal> {
        self.goals.update_existing(id, &input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.goals.delete_existing(id).await
    }

    pub async fn by_user(&self, user_id: &str) -> AppResult<Vec<Goal>> {
        self.goals
            .find_by(&Query::new().filter(Filter::eq("user_id", user_id)))
            .await
    }

    pub async fn by_team(&self, team_id: &str) -> AppResult<Vec<Goal>> {
        self.goals
            .find_by(&Query::new().filter(Filter::eq("team_id", team_id)))
            .await
    }

    pub async fn active(&self) -> AppResult<Vec<Goal>> {
        self.goals.find_by(&Self::active_query()).await
    }

    fn active_query() -> Query {
        Query::new().filter(Filter::eq("is_active", true))
    }

    pub async fn update_progress(&self, id: &str, current_value: f64) -> AppResult<Goal> {
        let update = UpdateGoal {
            current_value: Some(current_value),
            ..Default::default()
        };
        self.goals.update_existing(id, &update).await
    }

    pub async fn count_active(&self) -> AppResult<u64> {
        self.goals.count(&Self::active_query()).await
    }
}
