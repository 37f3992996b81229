//! Generic entity repository over a [`DocumentStore`].
//!
//! One `Repository<E>` serves every entity type: the entity's collection
//! name comes from [`Entity`], and serde is the codec between typed values
//! and stored documents. The `*_existing` helpers turn "no such id" into a
//! 404 for the service layer.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::DEFAULT_PAGE_SIZE;
pub use crate::domain::Entity;
use crate::errors::{AppError, AppResult};
use crate::infra::store::{Document, DocumentStore, Filter, Query};
use crate::types::PaginationParams;
use crate::utils::timestamp;

pub struct Repository<E> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

/// Serialize a value into a top-level field map.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> AppResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::internal(format!(
            "expected an object to store, got {}",
            other
        ))),
    }
}

fn is_unset(doc: &Document, key: &str) -> bool {
    doc.get(key).map_or(true, Value::is_null)
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    fn decode(doc: Document) -> AppResult<E> {
        Ok(serde_json::from_value(Value::Object(doc))?)
    }

    /// Persist a new entity from any serializable field set.
    ///
    /// Assigns `id`, `created_at` and `updated_at` when absent. No uniqueness
    /// checks happen here.
    pub async fn create<T: Serialize + ?Sized>(&self, fields: &T) -> AppResult<E> {
        let mut doc = to_document(fields)?;

        let has_id = doc
            .get("id")
            .and_then(Value::as_str)
            .map_or(false, |id| !id.is_empty());
        if !has_id {
            doc.insert("id".into(), Uuid::new_v4().to_string().into());
        }

        let now = timestamp::now();
        for key in ["created_at", "updated_at"] {
            if is_unset(&doc, key) {
                doc.insert(key.into(), now.clone().into());
            }
        }

        self.store.insert(E::COLLECTION, doc.clone()).await?;
        tracing::debug!(collection = E::COLLECTION, id = ?doc.get("id"), "document created");

        Self::decode(doc)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<E>> {
        self.store
            .find_one(E::COLLECTION, &Query::by_id(id))
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// Matching entities in a `skip`/`limit` window.
    pub async fn list(&self, skip: u64, limit: u64, query: &Query) -> AppResult<Vec<E>> {
        self.store
            .find(E::COLLECTION, query, skip, Some(limit))
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    /// Overwrite the supplied top-level fields and refresh `updated_at`.
    ///
    /// An `id` in `fields` is ignored. Returns `None` only when no entity
    /// has this id.
    pub async fn update<T: Serialize + ?Sized>(&self, id: &str, fields: &T) -> AppResult<Option<E>> {
        let mut doc = to_document(fields)?;
        doc.remove("id");
        doc.insert("updated_at".into(), timestamp::now().into());

        if !self.store.update(E::COLLECTION, id, doc).await? {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store.delete(E::COLLECTION, id).await
    }

    pub async fn count(&self, query: &Query) -> AppResult<u64> {
        self.store.count(E::COLLECTION, query).await
    }

    /// First entity whose `field` equals `value`.
    pub async fn find_one_by(&self, field: &str, value: impl Into<Value>) -> AppResult<Option<E>> {
        self.store
            .find_one(E::COLLECTION, &Query::new().filter(Filter::eq(field, value)))
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// Entities matching a fixed lookup, capped at the default page size.
    pub async fn find_by(&self, query: &Query) -> AppResult<Vec<E>> {
        self.list(0, DEFAULT_PAGE_SIZE, query).await
    }

    /// One page of matches together with the total match count.
    pub async fn page(&self, params: &PaginationParams, query: &Query) -> AppResult<(Vec<E>, u64)> {
        tokio::try_join!(self.list(params.skip, params.limit, query), self.count(query))
    }

    /// Fetch by id or fail with `"<Entity> not found"`.
    pub async fn require(&self, id: &str) -> AppResult<E> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(E::NAME))
    }

    /// Update by id or fail with `"<Entity> not found"`.
    pub async fn update_existing<T: Serialize + ?Sized>(&self, id: &str, fields: &T) -> AppResult<E> {
        self.update(id, fields)
            .await?
            .ok_or_else(|| AppError::not_found(E::NAME))
    }

    /// Delete by id; 404 when absent, 500 when the backend removes nothing.
    pub async fn delete_existing(&self, id: &str) -> AppResult<()> {
        self.require(id).await?;
        if !self.delete(id).await? {
            return Err(AppError::internal(format!(
                "Failed to delete {}",
                E::NAME.to_lowercase()
            )));
        }
        tracing::info!(collection = E::COLLECTION, id, "document deleted");
        Ok(())
    }

    /// Whether any entity other than `except_id` has `field == value`.
    pub async fn exists_other(
        &self,
        field: &str,
        value: impl Into<Value>,
        except_id: Option<&str>,
    ) -> AppResult<bool> {
        let matches = self
            .store
            .find(
                E::COLLECTION,
                &Query::new().filter(Filter::eq(field, value)),
                0,
                Some(2),
            )
            .await?;
        Ok(matches
            .iter()
            .any(|doc| doc.get("id").and_then(Value::as_str) != except_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::MockDocumentStore;
    use mockall::predicate::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
        created_at: String,
        updated_at: String,
    }

    impl Entity for Note {
        const COLLECTION: &'static str = "notes";
        const NAME: &'static str = "Note";
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .with(eq("notes"), always())
            .times(1)
            .returning(|_, doc| {
                assert!(doc.get("id").and_then(Value::as_str).is_some());
                assert_eq!(doc.get("created_at"), doc.get("updated_at"));
                Ok(())
            });

        let repo: Repository<Note> = Repository::new(Arc::new(store));
        let note = repo.create(&json!({"text": "hello"})).await.unwrap();

        assert_eq!(note.text, "hello");
        assert_eq!(Uuid::parse_str(&note.id).unwrap().get_version_num(), 4);
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_id() {
        let mut store = MockDocumentStore::new();
        store.expect_insert().returning(|_, _| Ok(()));

        let repo: Repository<Note> = Repository::new(Arc::new(store));
        let note = repo
            .create(&json!({"id": "fixed", "text": "x", "created_at": "2024-01-01T00:00:00.000000Z"}))
            .await
            .unwrap();

        assert_eq!(note.id, "fixed");
        assert_eq!(note.created_at, "2024-01-01T00:00:00.000000Z");
    }

    #[tokio::test]
    async fn test_update_strips_id_and_reports_missing() {
        let mut store = MockDocumentStore::new();
        store
            .expect_update()
            .withf(|collection, id, fields| {
                collection == "notes" && id == "gone" && !fields.contains_key("id")
                    && fields.contains_key("updated_at")
            })
            .returning(|_, _, _| Ok(false));

        let repo: Repository<Note> = Repository::new(Arc::new(store));
        let result = repo.update("gone", &json!({"id": "other", "text": "y"})).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_backend_errors_surface_unchanged() {
        let mut store = MockDocumentStore::new();
        store
            .expect_count()
            .returning(|_, _| Err(AppError::Database(sea_orm::DbErr::Custom("down".into()))));

        let repo: Repository<Note> = Repository::new(Arc::new(store));
        let err = repo.count(&Query::new()).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(to_document(&json!([1, 2])).is_err());
        assert!(to_document(&json!({"a": 1})).is_ok());
    }
}
