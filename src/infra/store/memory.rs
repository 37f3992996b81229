//! In-process document store.
//!
//! Collections are insertion-ordered vectors behind a single lock. Selected
//! with `DATABASE_URL=memory://`; the integration tests run against it.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{document_id, Document, DocumentStore, Query};
use crate::errors::{AppError, AppResult};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn position(docs: &[Document], id: &str) -> Option<usize> {
    docs.iter().position(|doc| document_id(doc) == Some(id))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Document) -> AppResult<()> {
        let id = document_id(&document)
            .ok_or_else(|| AppError::internal("document is missing a string id"))?
            .to_owned();

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();
        if position(docs, &id).is_some() {
            return Err(AppError::already_exists(format!("Document '{}'", id)));
        }
        docs.push(document);
        Ok(())
    }

    async fn find_one(&self, collection: &str, query: &Query) -> AppResult<Option<Document>> {
        Ok(self.find(collection, query, 0, Some(1)).await?.pop())
    }

    async fn find(
        &self,
        collection: &str,
        query: &Query,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&Document> = docs.iter().filter(|doc| query.matches(doc)).collect();
        if query.sort().is_some() {
            // Stable, so ties keep insertion order.
            matched.sort_by(|a, b| query.order(a, b));
        }

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        Ok(matched.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(index) = position(docs, id) else {
            return Ok(false);
        };
        // Top-level overwrite only; nested objects are replaced whole.
        docs[index].extend(fields);
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        match position(docs, id) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, collection: &str, query: &Query) -> AppResult<u64> {
        let collections = self.collections.read().await;
        let count = collections
            .get(collection)
            .map_or(0, |docs| docs.iter().filter(|doc| query.matches(doc)).count());
        Ok(count as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::{Filter, SortDirection};
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (id, score) in [("a", 3), ("b", 1), ("c", 2)] {
            store
                .insert("metrics", doc(json!({"id": id, "value": score})))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let store = seeded().await;
        let docs = store.find("metrics", &Query::new(), 0, None).await.unwrap();
        let ids: Vec<_> = docs.iter().filter_map(document_id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_find_sorted_with_window() {
        let store = seeded().await;
        let query = Query::new().sort_by("value", SortDirection::Desc);
        let docs = store.find("metrics", &query, 1, Some(1)).await.unwrap();
        assert_eq!(document_id(&docs[0]), Some("c"));
    }

    #[tokio::test]
    async fn test_update_reports_existence() {
        let store = seeded().await;

        let unchanged = doc(json!({"value": 3}));
        assert!(store.update("metrics", "a", unchanged).await.unwrap());
        assert!(!store.update("metrics", "zzz", Document::new()).await.unwrap());
        assert!(!store.update("other", "a", Document::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let store = seeded().await;
        let high = Query::new().filter(Filter::range("value", Some(json!(2)), None));

        assert_eq!(store.count("metrics", &high).await.unwrap(), 2);
        assert!(store.delete("metrics", "a").await.unwrap());
        assert!(!store.delete("metrics", "a").await.unwrap());
        assert_eq!(store.count("metrics", &high).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = seeded().await;
        let result = store.insert("metrics", doc(json!({"id": "a"}))).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }
}
