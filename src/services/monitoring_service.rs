//! Monitoring service - metrics and the dashboard summary.

use chrono::{DateTime, Utc};

use super::{CustomerService, GoalService, TicketService, UserService};
use crate::config::DASHBOARD_METRICS_PER_CATEGORY;
use crate::domain::metric::DASHBOARD_CATEGORIES;
use crate::domain::{CreateMetric, Dashboard, DashboardTotals, MetricFilter, MonitoringMetric};
use crate::errors::AppResult;
use crate::infra::{Filter, Query, Repository, SortDirection};
use crate::types::PaginationParams;
use crate::utils::timestamp;

#[derive(Clone)]
pub struct MonitoringService {
    metrics: Repository<MonitoringMetric>,
}

impl MonitoringService {
    pub fn new(metrics: Repository<MonitoringMetric>) -> Self {
        Self { metrics }
    }

    fn query(filter: &MetricFilter) -> Query {
        Query::new()
            .eq_opt("category", filter.category.as_deref())
            .eq_opt("user_id", filter.user_id.as_deref())
            .eq_opt("name", filter.name.as_deref())
            .range_opt(
                "timestamp",
                filter
                    .date_from
                    .map(|d| timestamp::format(&timestamp::start_of_day(d)).into()),
                filter
                    .date_to
                    .map(|d| timestamp::format(&timestamp::end_of_day(d)).into()),
            )
    }

    pub async fn create(&self, input: CreateMetric) -> AppResult<MonitoringMetric> {
        self.metrics.create(&MonitoringMetric::new(input)).await
    }

    pub async fn get(&self, id: &str) -> AppResult<MonitoringMetric> {
        self.metrics.require(id).await
    }

    pub async fn list(
        &self,
        filter: &MetricFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<MonitoringMetric>, u64)> {
        self.metrics.page(params, &Self::query(filter)).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.metrics.delete_existing(id).await
    }

    pub async fn by_category(&self, category: &str) -> AppResult<Vec<MonitoringMetric>> {
        self.metrics
            .find_by(&Query::new().filter(Filter::eq("category", category)))
            .await
    }

    pub async fn by_user(&self, user_id: &str) -> AppResult<Vec<MonitoringMetric>> {
        self.metrics
            .find_by(&Query::new().filter(Filter::eq("user_id", user_id)))
            .await
    }

    /// Metrics recorded within `[start, end]`.
    pub async fn by_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<MonitoringMetric>> {
        let query = Query::new().filter(Filter::range(
            "timestamp",
            Some(timestamp::format(&start).into()),
            Some(timestamp::format(&end).into()),
        ));
        self.metrics.find_by(&query).await
    }

    /// Most recent metrics first.
    pub async fn latest(&self, limit: u64) -> AppResult<Vec<MonitoringMetric>> {
        let query = Query::new().sort_by("timestamp", SortDirection::Desc);
        self.metrics.list(0, limit, &query).await
    }

    async fn latest_in(&self, category: &str) -> AppResult<Vec<MonitoringMetric>> {
        let query = Query::new()
            .filter(Filter::eq("category", category))
            .sort_by("timestamp", SortDirection::Desc);
        self.metrics
            .list(0, DASHBOARD_METRICS_PER_CATEGORY, &query)
            .await
    }

    /// Latest metrics per dashboard category plus headline counts.
    pub async fn dashboard(
        &self,
        users: &UserService,
        customers: &CustomerService,
        tickets: &TicketService,
        goals: &GoalService,
    ) -> AppResult<Dashboard> {
        let [performance, quality, volume] = DASHBOARD_CATEGORIES;

        let (performance, quality, volume, users, customers, open_tickets, active_goals) =
            tokio::try_join!(
                self.latest_in(performance),
                self.latest_in(quality),
                self.latest_in(volume),
                users.count(),
                customers.count(),
                tickets.count_open(),
                goals.count_active(),
            )?;

        Ok(Dashboard {
            performance,
            quality,
            volume,
            totals: DashboardTotals {
                users,
                customers,
                open_tickets,
                active_goals,
            },
            last_updated: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{DocumentStore, MemoryStore};
    use serde_json::json;
    use std::sync::Arc;

    async fn record(service: &MonitoringService, category: &str, at: &str) {
        let input: CreateMetric = serde_json::from_value(json!({
            "name": "handled",
            "value": 1.0,
            "unit": "tickets",
            "category": category,
            "timestamp": at
        }))
        .unwrap();
        service.create(input).await.unwrap();
    }

    #[tokio::test]
    async fn test_latest_sorted_descending() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let service = MonitoringService::new(Repository::new(store));

        record(&service, "volume", "2024-01-02T00:00:00Z").await;
        record(&service, "volume", "2024-01-03T00:00:00Z").await;
        record(&service, "volume", "2024-01-01T00:00:00Z").await;

        let latest = service.latest(2).await.unwrap();
        let stamps: Vec<_> = latest.iter().map(|m| timestamp::format(&m.timestamp)).collect();

        assert_eq!(
            stamps,
            vec!["2024-01-03T00:00:00.000000Z", "2024-01-02T00:00:00.000000Z"]
        );
    }

    #[tokio::test]
    async fn test_date_filter_covers_whole_days() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let service = MonitoringService::new(Repository::new(store));

        record(&service, "quality", "2024-01-01T23:59:59Z").await;
        record(&service, "quality", "2024-01-02T00:00:00Z").await;

        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let filter = MetricFilter {
            date_from: Some(day),
            date_to: Some(day),
            ..Default::default()
        };
        let (items, total) = service
            .list(&filter, &PaginationParams::default())
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(items.len(), 1);
    }
}
