//! Service container - one place to build and share every service.
//!
//! All services share a single `DocumentStore`; cloning a service only
//! clones the `Arc` underneath.

use std::sync::Arc;

use super::{
    AttendanceService, AuthService, Authenticator, CustomerService, GoalService,
    MonitoringService, ScheduleService, TicketService, UserService,
};
use crate::config::Config;
use crate::domain::Dashboard;
use crate::errors::AppResult;
use crate::infra::{DocumentStore, Repository};

#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub users: UserService,
    pub customers: CustomerService,
    pub tickets: TicketService,
    pub goals: GoalService,
    pub attendance: AttendanceService,
    pub monitoring: MonitoringService,
    pub schedules: ScheduleService,
}

impl Services {
    /// Wire every service against the given store.
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let users = UserService::new(Repository::new(store.clone()));
        let customers = CustomerService::new(Repository::new(store.clone()));

        Self {
            auth: Arc::new(Authenticator::new(Repository::new(store.clone()), config)),
            tickets: TicketService::new(Repository::new(store.clone()), customers.clone()),
            goals: GoalService::new(Repository::new(store.clone())),
            attendance: AttendanceService::new(Repository::new(store.clone())),
            monitoring: MonitoringService::new(Repository::new(store.clone())),
            schedules: ScheduleService::new(Repository::new(store), users.clone()),
            users,
            customers,
        }
    }

    pub async fn dashboard(&self) -> AppResult<Dashboard> {
        self.monitoring
            .dashboard(&self.users, &self.customers, &self.tickets, &self.goals)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryStore;

    fn services() -> Services {
        let config = Config::new("memory://", "a-test-secret-that-is-at-least-32-chars").unwrap();
        Services::new(Arc::new(MemoryStore::new()), config)
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let dashboard = services().dashboard().await.unwrap();

        assert!(dashboard.performance.is_empty());
        assert!(dashboard.quality.is_empty());
        assert!(dashboard.volume.is_empty());
        assert_eq!(dashboard.totals.users, 0);
        assert_eq!(dashboard.totals.open_tickets, 0);
    }

    #[tokio::test]
    async fn test_services_share_one_store() {
        let services = services();
        let customer = services
            .customers
            .create(serde_json::from_value(serde_json::json!({"name": "Maria"})).unwrap())
            .await
            .unwrap();

        // A clone sees writes made through the original
        let cloned = services.clone();
        assert_eq!(cloned.customers.get(&customer.id).await.unwrap().name, "Maria");
        assert_eq!(cloned.dashboard().await.unwrap().totals.customers, 1);
    }
}
