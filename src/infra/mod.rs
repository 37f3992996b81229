//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Document store backends
//! - The generic entity repository

pub mod db;
pub mod repositories;
pub mod store;

use std::sync::Arc;

pub use db::{Database, Migrator};
pub use repositories::{Entity, Repository};
pub use store::{Document, DocumentStore, Filter, MemoryStore, PostgresStore, Query, SortDirection};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockDocumentStore;

use crate::config::Config;
use crate::errors::AppResult;

/// Open the document store selected by `DATABASE_URL`.
pub async fn connect_store(config: &Config) -> AppResult<Arc<dyn DocumentStore>> {
    if config.uses_memory_store() {
        tracing::warn!("Using in-memory document store; data is lost on shutdown");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let db = Database::connect(config).await?;
    Ok(Arc::new(PostgresStore::new(db)))
}
