//! Customer service.

use crate::domain::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
use crate::errors::{AppError, AppResult};
use crate::infra::{Filter, Query, Repository};
use crate::types::PaginationParams;

/// Fields a free-text customer search looks at
const SEARCH_FIELDS: [&str; 3] = ["name", "email", "company"];

#[derive(Clone)]
pub struct CustomerService {
    customers: Repository<Customer>,
}

impl CustomerService {
    pub fn new(customers: Repository<Customer>) -> Self {
        Self { customers }
    }

    fn search_filter(text: &str) -> Filter {
        Filter::any(
            SEARCH_FIELDS
                .iter()
                .map(|field| Filter::contains(*field, text))
                .collect(),
        )
    }

    fn query(filter: &CustomerFilter) -> Query {
        match filter.search.as_deref().filter(|s| !s.is_empty()) {
            // Search takes precedence over the other filters.
            Some(text) => Query::new().filter(Self::search_filter(text)),
            None => Query::new().eq_opt("is_active", filter.is_active),
        }
    }

    async fn ensure_email_free(&self, email: &str, except_id: Option<&str>) -> AppResult<()> {
        if self.customers.exists_other("email", email, except_id).await? {
            return Err(AppError::already_exists("Email"));
        }
        Ok(())
    }

    pub async fn create(&self, input: CreateCustomer) -> AppResult<Customer> {
        if let Some(email) = &input.email {
            self.ensure_email_free(email, None).await?;
        }
        self.customers.create(&Customer::new(input)).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Customer> {
        self.customers.require(id).await
    }

    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        Ok(self.customers.get_by_id(id).await?.is_some())
    }

    /// Page through customers; with `search` set, the total counts every
    /// search hit, not just the page.
    pub async fn list(
        &self,
        filter: &CustomerFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Customer>, u64)> {
        self.customers.page(params, &Self::query(filter)).await
    }

    pub async fn update(&self, id: &str, input: UpdateCustomer) -> AppResult<Customer> {
        self.customers.require(id).await?;
        if let Some(email) = &input.email {
            self.ensure_email_free(email, Some(id)).await?;
        }
        self.customers.update_existing(id, &input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.customers.delete_existing(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Customer> {
        self.customers
            .find_one_by("email", email)
            .await?
            .ok_or_else(|| AppError::not_found("Customer"))
    }

    pub async fn get_by_phone(&self, phone: &str) -> AppResult<Customer> {
        self.customers
            .find_one_by("phone", phone)
            .await?
            .ok_or_else(|| AppError::not_found("Customer"))
    }

    /// Case-insensitive substring search over name, email and company.
    pub async fn search(&self, text: &str) -> AppResult<Vec<Customer>> {
        self.customers
            .find_by(&Query::new().filter(Self::search_filter(text)))
            .await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.customers.count(&Query::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_overrides_other_filters() {
        let filter = CustomerFilter {
            is_active: Some(true),
            search: Some("acme".into()),
        };
        let query = CustomerService::query(&filter);

        assert_eq!(query.filters().len(), 1);
        assert!(matches!(&query.filters()[0], Filter::Any(parts) if parts.len() == 3));
    }

    #[test]
    fn test_empty_search_ignored() {
        let filter = CustomerFilter {
            is_active: Some(false),
            search: Some(String::new()),
        };
        assert_eq!(
            CustomerService::query(&filter).filters(),
            &[Filter::eq("is_active", false)]
        );
    }
}
