//! Goal entity: a numeric target for a user or a team over a period.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_true, Entity};
use crate::config::COLLECTION_GOALS;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Goal {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    /// What is being counted, e.g. "tickets" or "calls"
    pub unit: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(with = "crate::utils::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub end_date: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "crate::utils::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Goal {
    const COLLECTION: &'static str = COLLECTION_GOALS;
    const NAME: &'static str = "Goal";
}

impl Goal {
    pub fn new(input: CreateGoal) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            title: input.title,
            description: input.description,
            target_value: input.target_value,
            current_value: 0.0,
            unit: input.unit,
            user_id: input.user_id,
            team_id: input.team_id,
            start_date: input.start_date,
            end_date: input.end_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Percentage of the target reached; zero when the target is not positive.
    pub fn progress_percent(&self) -> f64 {
        if self.target_value > 0.0 {
            self.current_value / self.target_value * 100.0
        } else {
            0.0
        }
    }
}

/// Goal with its derived progress.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GoalResponse {
    #[serde(flatten)]
    pub goal: Goal,
    #[schema(example = 42.5)]
    pub progress_percent: f64,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        let progress_percent = goal.progress_percent();
        Self {
            goal,
            progress_percent,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGoal {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Resolve 100 tickets")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_value: f64,
    #[schema(example = "tickets")]
    pub unit: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(with = "crate::utils::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateGoal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::timestamp::option"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::timestamp::option"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GoalFilter {
    pub user_id: Option<String>,
    pub team_id: Option<String>,
    pub is_active: Option<bool>,
    pub unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn goal(target: f64, current: f64) -> Goal {
        let mut goal = Goal::new(
            serde_json::from_value(json!({
                "title": "Calls",
                "target_value": target,
                "unit": "calls",
                "start_date": "2024-01-01T00:00:00Z",
                "end_date": "2024-01-31T00:00:00Z"
            }))
            .unwrap(),
        );
        goal.current_value = current;
        goal
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(goal(200.0, 50.0).progress_percent(), 25.0);
        assert_eq!(goal(0.0, 50.0).progress_percent(), 0.0);
    }

    #[test]
    fn test_response_flattens_goal() {
        let body = serde_json::to_value(GoalResponse::from(goal(10.0, 5.0))).unwrap();

        assert_eq!(body["title"], "Calls");
        assert_eq!(body["progress_percent"], 50.0);
        assert_eq!(body["start_date"], "2024-01-01T00:00:00.000000Z");
    }
}
