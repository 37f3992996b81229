//! Ticket service - support tickets and their lifecycle.

use chrono::Utc;
use serde::Serialize;

use super::CustomerService;
use crate::domain::{CreateTicket, Ticket, TicketFilter, TicketStatus, UpdateTicket};
use crate::errors::{AppError, AppResult};
use crate::infra::{Filter, Query, Repository};
use crate::types::PaginationParams;

#[derive(Serialize)]
struct Resolution<'a> {
    status: TicketStatus,
    resolution: &'a str,
    #[serde(with = "crate::utils::timestamp")]
    resolved_at: chrono::DateTime<Utc>,
}

#[derive(Serialize)]
struct Rating<'a> {
    satisfaction_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    satisfaction_comment: Option<&'a str>,
}

#[derive(Clone)]
pub struct TicketService {
    tickets: Repository<Ticket>,
    customers: CustomerService,
}

impl TicketService {
    pub fn new(tickets: Repository<Ticket>, customers: CustomerService) -> Self {
        Self { tickets, customers }
    }

    fn query(filter: &TicketFilter) -> Query {
        Query::new()
            .eq_opt("status", filter.status.map(|s| s.as_str()))
            .eq_opt("priority", filter.priority.map(|p| p.as_str()))
            .eq_opt("assigned_to", filter.assigned_to.as_deref())
            .eq_opt("customer_id", filter.customer_id.as_deref())
            .eq_opt("channel", filter.channel.map(|c| c.as_str()))
    }

    /// Open a ticket for an existing customer.
    pub async fn create(&self, input: CreateTicket) -> AppResult<Ticket> {
        if !self.customers.exists(&input.customer_id).await? {
            return Err(AppError::not_found("Customer"));
        }
        let ticket = self.tickets.create(&Ticket::new(input)).await?;
        tracing::info!(ticket_number = %ticket.ticket_number, "ticket opened");
        Ok(ticket)
    }

    pub async fn get(&self, id: &str) -> AppResult<Ticket> {
        self.tickets.require(id).await
    }

    pub async fn list(
        &self,
        filter: &TicketFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Ticket>, u64)> {
        self.tickets.page(params, &Self::query(filter)).await
    }

    pub async fn update(&self, id: &str, input: UpdateTicket) -> AppResult<Ticket> {
        self.tickets.update_existing(id, &input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.tickets.delete_existing(id).await
    }

    async fn by_field(&self, field: &str, value: &str) -> AppResult<Vec<Ticket>> {
        self.tickets
            .find_by(&Query::new().filter(Filter::eq(field, value)))
            .await
    }

    pub async fn by_customer(&self, customer_id: &str) -> AppResult<Vec<Ticket>> {
        self.by_field("customer_id", customer_id).await
    }

    pub async fn by_assignee(&self, user_id: &str) -> AppResult<Vec<Ticket>> {
        self.by_field("assigned_to", user_id).await
    }

    pub async fn by_status(&self, status: &str) -> AppResult<Vec<Ticket>> {
        self.by_field("status", status).await
    }

    pub async fn assign(&self, id: &str, user_id: &str) -> AppResult<Ticket> {
        let update = UpdateTicket {
            assigned_to: Some(user_id.to_owned()),
            ..Default::default()
        };
        self.tickets.update_existing(id, &update).await
    }

    pub async fn resolve(&self, id: &str, resolution: &str) -> AppResult<Ticket> {
        let update = Resolution {
            status: TicketStatus::Resolved,
            resolution,
            resolved_at: Utc::now(),
        };
        self.tickets.update_existing(id, &update).await
    }

    /// Record customer satisfaction (1-5) with an optional comment.
    pub async fn rate(&self, id: &str, rating: u8, comment: Option<&str>) -> AppResult<Ticket> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }
        let update = Rating {
            satisfaction_rating: rating,
            satisfaction_comment: comment.filter(|c| !c.is_empty()),
        };
        self.tickets.update_existing(id, &update).await
    }

    pub async fn count_open(&self) -> AppResult<u64> {
        self.tickets
            .count(&Query::new().filter(Filter::eq("status", TicketStatus::Open.as_str())))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockDocumentStore;
    use std::sync::Arc;

    fn service(store: MockDocumentStore) -> TicketService {
        let store = Arc::new(store);
        TicketService::new(
            Repository::new(store.clone()),
            CustomerService::new(Repository::new(store)),
        )
    }

    #[tokio::test]
    async fn test_rating_out_of_range_never_touches_store() {
        let mut store = MockDocumentStore::new();
        store.expect_update().never();
        store.expect_find_one().never();

        let err = service(store).rate("t1", 10, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Rating must be between 1 and 5");
    }

    #[tokio::test]
    async fn test_unknown_customer_checked_before_insert() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_one()
            .withf(|collection, _| collection == "customers")
            .returning(|_, _| Ok(None));
        store.expect_insert().never();

        let input: CreateTicket = serde_json::from_value(serde_json::json!({
            "title": "Broken",
            "description": "It broke",
            "channel": "email",
            "customer_id": "missing"
        }))
        .unwrap();

        let err = service(store).create(input).await.unwrap_err();
        assert_eq!(err.to_string(), "Customer not found");
    }
}
