//! Repository behaviour against the in-memory store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crm_api::domain::Entity;
use crm_api::infra::{DocumentStore, Filter, MemoryStore, Query, Repository, SortDirection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Lead {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,
    name: String,
    stage: String,
    score: i64,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl Entity for Lead {
    const COLLECTION: &'static str = "leads";
    const NAME: &'static str = "Lead";
}

fn repository() -> Repository<Lead> {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    Repository::new(store)
}

async fn seed(repo: &Repository<Lead>, count: i64) -> Vec<Lead> {
    let mut leads = Vec::new();
    for i in 0..count {
        let stage = if i % 2 == 0 { "new" } else { "qualified" };
        let lead = repo
            .create(&json!({"name": format!("Lead {i}"), "stage": stage, "score": i * 10}))
            .await
            .unwrap();
        leads.push(lead);
    }
    leads
}

#[tokio::test]
async fn test_created_document_round_trips() {
    let repo = repository();
    let created = repo
        .create(&json!({"name": "Acme", "stage": "new", "score": 5}))
        .await
        .unwrap();

    assert!(!created.id.is_empty());
    assert!(created.created_at.is_some());
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn test_caller_supplied_id_is_kept() {
    let repo = repository();
    let created = repo
        .create(&json!({"id": "lead-42", "name": "Acme", "stage": "new", "score": 1}))
        .await
        .unwrap();

    assert_eq!(created.id, "lead-42");
    assert!(repo.get_by_id("lead-42").await.unwrap().is_some());
}

#[tokio::test]
async fn test_empty_update_keeps_fields_and_reports_found() {
    let repo = repository();
    let created = repo
        .create(&json!({"name": "Acme", "stage": "new", "score": 5}))
        .await
        .unwrap();

    let updated = repo.update(&created.id, &json!({})).await.unwrap().unwrap();
    assert_eq!(updated.name, "Acme");
    assert_eq!(updated.score, 5);

    let same = repo
        .update(&created.id, &json!({"name": "Acme"}))
        .await
        .unwrap();
    assert!(same.is_some());
}

#[tokio::test]
async fn test_update_cannot_change_id() {
    let repo = repository();
    let created = repo
        .create(&json!({"name": "Acme", "stage": "new", "score": 5}))
        .await
        .unwrap();

    let updated = repo
        .update(&created.id, &json!({"id": "hijacked", "stage": "won"}))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.stage, "won");
    assert!(repo.get_by_id("hijacked").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_unknown_id_is_none() {
    let repo = repository();
    assert!(repo.update("missing", &json!({"stage": "won"})).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_then_get_is_none() {
    let repo = repository();
    let created = repo
        .create(&json!({"name": "Acme", "stage": "new", "score": 5}))
        .await
        .unwrap();

    assert!(repo.delete(&created.id).await.unwrap());
    assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
    assert!(!repo.delete(&created.id).await.unwrap());
}

#[tokio::test]
async fn test_count_matches_unbounded_list() {
    let repo = repository();
    seed(&repo, 7).await;

    let query = Query::new().filter(Filter::eq("stage", "new"));
    let listed = repo.list(0, u64::MAX, &query).await.unwrap();

    assert_eq!(repo.count(&query).await.unwrap(), listed.len() as u64);
    assert_eq!(listed.len(), 4);
}

#[tokio::test]
async fn test_windows_are_contiguous() {
    let repo = repository();
    let all = seed(&repo, 5).await;
    let query = Query::new();

    let first = repo.list(0, 2, &query).await.unwrap();
    let second = repo.list(2, 2, &query).await.unwrap();
    let third = repo.list(4, 2, &query).await.unwrap();

    let stitched: Vec<Lead> = first.into_iter().chain(second).chain(third).collect();
    assert_eq!(stitched, all);
}

#[tokio::test]
async fn test_range_contains_and_sort() {
    let repo = repository();
    seed(&repo, 5).await;

    let query = Query::new()
        .filter(Filter::range("score", Some(json!(10)), Some(json!(30))))
        .sort_by("score", SortDirection::Desc);
    let scores: Vec<i64> = repo
        .list(0, 10, &query)
        .await
        .unwrap()
        .iter()
        .map(|l| l.score)
        .collect();
    assert_eq!(scores, vec![30, 20, 10]);

    let query = Query::new().filter(Filter::any(vec![
        Filter::contains("name", "LEAD 1"),
        Filter::contains("name", "lead 4"),
    ]));
    assert_eq!(repo.count(&query).await.unwrap(), 2);
}

#[tokio::test]
async fn test_require_and_delete_existing_report_not_found() {
    let repo = repository();

    let err = repo.require("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Lead not found");

    let err = repo.delete_existing("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Lead not found");
}
