//! Team shift schedules.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_true, Entity};
use crate::config::COLLECTION_SCHEDULES;
use crate::errors::{AppError, AppResult};

static SHIFT_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid shift time pattern"));

/// Highest weekday index (0 = Monday, 6 = Sunday)
const LAST_WEEKDAY: u8 = 6;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Schedule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[schema(example = "Morning shift")]
    pub name: String,
    pub user_id: String,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "18:00")]
    pub end_time: String,
    #[schema(example = json!([0, 1, 2, 3, 4]))]
    pub days_of_week: Vec<u8>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "crate::utils::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Schedule {
    const COLLECTION: &'static str = COLLECTION_SCHEDULES;
    const NAME: &'static str = "Schedule";
}

impl Schedule {
    pub fn new(input: CreateSchedule) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: input.name,
            user_id: input.user_id,
            start_time: input.start_time,
            end_time: input.end_time,
            days_of_week: input.days_of_week,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Check a `HH:MM` shift boundary.
pub fn check_shift_time(field: &str, value: &str) -> AppResult<()> {
    if SHIFT_TIME.is_match(value) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{} must be a 24-hour HH:MM time, got '{}'",
            field, value
        )))
    }
}

/// Check weekday indices are within 0..=6.
pub fn check_days(days: &[u8]) -> AppResult<()> {
    match days.iter().find(|&&day| day > LAST_WEEKDAY) {
        Some(day) => Err(AppError::validation(format!(
            "days_of_week must be between 0 and {}, got {}",
            LAST_WEEKDAY, day
        ))),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSchedule {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
    pub days_of_week: Vec<u8>,
}

impl CreateSchedule {
    pub fn check(&self) -> AppResult<()> {
        check_shift_time("start_time", &self.start_time)?;
        check_shift_time("end_time", &self.end_time)?;
        check_days(&self.days_of_week)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateSchedule {
    pub fn check(&self) -> AppResult<()> {
        if let Some(start) = &self.start_time {
            check_shift_time("start_time", start)?;
        }
        if let Some(end) = &self.end_time {
            check_shift_time("end_time", end)?;
        }
        if let Some(days) = &self.days_of_week {
            check_days(days)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleFilter {
    pub user_id: Option<String>,
    pub is_active: Option<bool>,
}
