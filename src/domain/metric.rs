//! Monitoring metrics: timestamped measurements grouped by category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::Entity;
use crate::config::COLLECTION_METRICS;

/// Categories shown on the dashboard
pub const DASHBOARD_CATEGORIES: [&str; 3] = ["performance", "quality", "volume"];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonitoringMetric {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[schema(example = "avg_response_time")]
    pub name: String,
    pub value: f64,
    #[schema(example = "seconds")]
    pub unit: String,
    #[serde(with = "crate::utils::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[schema(example = "performance")]
    pub category: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
    #[serde(with = "crate::utils::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for MonitoringMetric {
    const COLLECTION: &'static str = COLLECTION_METRICS;
    const NAME: &'static str = "Metric";
}

impl MonitoringMetric {
    pub fn new(input: CreateMetric) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: input.name,
            value: input.value,
            unit: input.unit,
            timestamp: input.timestamp.unwrap_or(now),
            category: input.category,
            user_id: input.user_id,
            metadata: input.metadata,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMetric {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub value: f64,
    pub unit: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Defaults to the time of recording
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MetricFilter {
    pub category: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Latest metrics per dashboard category plus headline counts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Dashboard {
    pub performance: Vec<MonitoringMetric>,
    pub quality: Vec<MonitoringMetric>,
    pub volume: Vec<MonitoringMetric>,
    pub totals: DashboardTotals,
    #[serde(with = "crate::utils::timestamp")]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct DashboardTotals {
    pub users: u64,
    pub customers: u64,
    pub open_tickets: u64,
    pub active_goals: u64,
}
