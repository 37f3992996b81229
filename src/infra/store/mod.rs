//! Document store abstraction.
//!
//! Every entity is persisted as a JSON object in a named collection and is
//! addressed by its string `id` field. Backends never expose their own row
//! identifiers.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

mod filter;
mod memory;
mod postgres;

pub use filter::{Filter, Query, Sort, SortDirection};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// A stored document: the entity's top-level fields.
pub type Document = Map<String, Value>;

/// Persistence operations shared by all backends.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document. The document must carry a string `id`.
    async fn insert(&self, collection: &str, document: Document) -> AppResult<()>;

    /// First matching document in query order.
    async fn find_one(&self, collection: &str, query: &Query) -> AppResult<Option<Document>>;

    /// Matching documents after skipping `skip`, at most `limit` of them.
    async fn find(
        &self,
        collection: &str,
        query: &Query,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<Document>>;

    /// Overwrite the given top-level fields of the document with this id.
    ///
    /// Returns whether a document with the id exists, regardless of whether
    /// any value actually changed.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> AppResult<bool>;

    /// Remove the document with this id. Returns whether one was removed.
    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool>;

    /// Number of matching documents.
    async fn count(&self, collection: &str, query: &Query) -> AppResult<u64>;

    /// Check backend connectivity.
    async fn ping(&self) -> AppResult<()>;
}

/// Extract the logical id a document is stored under.
pub(crate) fn document_id(document: &Document) -> Option<&str> {
    document.get("id").and_then(Value::as_str)
}
