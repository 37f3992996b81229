//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::DocumentStore;
use crate::services::{AuthService, Services};

/// Store handle plus the services built on top of it.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Build every service against `store`.
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let services = Arc::new(Services::new(store.clone(), config));
        Self { services, store }
    }

    /// Use an already wired container, e.g. one with a mocked auth service.
    pub fn with_services(services: Services, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            services: Arc::new(services),
            store,
        }
    }

    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.services.auth
    }
}
