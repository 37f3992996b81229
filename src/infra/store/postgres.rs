//! PostgreSQL document store on a single JSONB table.
//!
//! Filters become JSONB expressions over `body`:
//! - equality: containment (`body @> {"field": value}`)
//! - range: `body -> field` compared against a JSONB bound of the same type
//! - substring: case-insensitive regex on `body ->> field`, needle escaped

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, Value,
};
use serde_json::Value as Json;

use super::{document_id, Document, DocumentStore, Filter, Query, SortDirection};
use crate::errors::{AppError, AppResult};
use crate::infra::db::Database;
use crate::infra::repositories::entities::{
    DocumentActiveModel, DocumentColumn, DocumentEntity, DocumentModel,
};

#[derive(Clone)]
pub struct PostgresStore {
    db: Database,
}

impl PostgresStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.db.connection()
    }
}

fn in_collection(collection: &str) -> Condition {
    Condition::all().add(DocumentColumn::Collection.eq(collection))
}

fn with_id(collection: &str, id: &str) -> Condition {
    in_collection(collection).add(DocumentColumn::DocId.eq(id))
}

fn field(name: &str) -> Value {
    Value::from(name.to_owned())
}

fn jsonb(value: Json) -> Value {
    Value::from(value)
}

fn range_bound(name: &str, bound: &Json, op: &str) -> SimpleExpr {
    Expr::cust_with_values(
        format!(
            "(jsonb_typeof(body -> $1) = jsonb_typeof($2::jsonb) AND body -> $3 {} $4::jsonb)",
            op
        ),
        [
            field(name),
            jsonb(bound.clone()),
            field(name),
            jsonb(bound.clone()),
        ],
    )
}

/// Translate a filter into a SQL condition over `body`.
fn condition(filter: &Filter) -> Condition {
    match filter {
        Filter::Eq(name, value) => {
            let mut probe = Document::new();
            probe.insert(name.clone(), value.clone());
            Condition::all().add(Expr::cust_with_values(
                "body @> $1::jsonb",
                [jsonb(Json::Object(probe))],
            ))
        }
        Filter::Range { field: name, gte, lte } => {
            let mut cond = Condition::all();
            if let Some(bound) = gte {
                cond = cond.add(range_bound(name, bound, ">="));
            }
            if let Some(bound) = lte {
                cond = cond.add(range_bound(name, bound, "<="));
            }
            cond
        }
        Filter::Contains(name, needle) => Condition::all().add(Expr::cust_with_values(
            "body ->> $1 ~* $2",
            [field(name), Value::from(regex::escape(needle))],
        )),
        Filter::Any(filters) if filters.is_empty() => {
            Condition::all().add(Expr::cust("FALSE"))
        }
        Filter::Any(filters) => filters
            .iter()
            .fold(Condition::any(), |cond, f| cond.add(condition(f))),
    }
}

fn query_condition(collection: &str, query: &Query) -> Condition {
    query
        .filters()
        .iter()
        .fold(in_collection(collection), |cond, f| cond.add(condition(f)))
}

fn into_document(model: DocumentModel) -> AppResult<Document> {
    match model.body {
        Json::Object(map) => Ok(map),
        other => Err(AppError::internal(format!(
            "document {} has a non-object body: {}",
            model.doc_id, other
        ))),
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert(&self, collection: &str, document: Document) -> AppResult<()> {
        let id = document_id(&document)
            .ok_or_else(|| AppError::internal("document is missing a string id"))?
            .to_owned();

        let model = DocumentActiveModel {
            collection: Set(collection.to_owned()),
            doc_id: Set(id.clone()),
            body: Set(Json::Object(document)),
            ..Default::default()
        };

        match DocumentEntity::insert(model).exec(self.conn()).await {
            Ok(_) => Ok(()),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::already_exists(format!("Document '{}'", id)))
                }
                _ => Err(err.into()),
            },
        }
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
        let mut select = DocumentEntity::find().filter(query_condition(collection, query));

        if let Some(sort) = query.sort() {
            let order = match sort.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            select = select.order_by(
                Expr::cust_with_values("body -> $1", [field(&sort.field)]),
                order,
            );
        }

        select = select.order_by_asc(DocumentColumn::RowId).offset(skip);
        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        select
            .all(self.conn())
            .await?
            .into_iter()
            .map(into_document)
            .collect()
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> AppResult<bool> {
        let result = DocumentEntity::update_many()
            .col_expr(
                DocumentColumn::Body,
                Expr::cust_with_values("body || $1::jsonb", [jsonb(Json::Object(fields))]),
            )
            .filter(with_id(collection, id))
            .exec(self.conn())
            .await?;

        // Postgres counts matched rows, so an unchanged document still reports 1.
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool> {
        let result = DocumentEntity::delete_many()
            .filter(with_id(collection, id))
            .exec(self.conn())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self, collection: &str, query: &Query) -> AppResult<u64> {
        Ok(DocumentEntity::find()
            .filter(query_condition(collection, query))
            .count(self.conn())
            .await?)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(self.db.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};
    use serde_json::json;

    fn sql(query: &Query) -> String {
        DocumentEntity::find()
            .filter(query_condition("tickets", query))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_equality_uses_containment() {
        let rendered = sql(&Query::new().filter(Filter::eq("status", "open")));

        assert!(rendered.contains("'tickets'"));
        assert!(rendered.contains("body @> "));
        assert!(rendered.contains("::jsonb"));
    }

    #[test]
    fn test_substring_uses_case_insensitive_regex() {
        let rendered = sql(&Query::new().filter(Filter::contains("title", "printer")));
        assert!(rendered.contains("body ->> 'title' ~* 'printer'"));
    }

    #[test]
    fn test_any_of_joins_with_or() {
        let rendered = sql(&Query::new().filter(Filter::any(vec![
            Filter::contains("name", "x"),
            Filter::contains("email", "x"),
        ])));
        assert!(rendered.contains(" OR "));
    }

    #[test]
    fn test_range_checks_type() {
        let rendered = sql(&Query::new().filter(Filter::range("value", Some(json!(5)), None)));
        assert!(rendered.contains("jsonb_typeof(body -> 'value')"));
        assert!(rendered.contains(">= "));
    }
}
