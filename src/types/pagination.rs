//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

use crate::config::DEFAULT_PAGE_SIZE;

/// `skip`/`limit` window shared by every list endpoint
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of matching documents to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of documents to return (1-1000)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// 1-based page the window starts on
    pub fn page(&self) -> u64 {
        self.skip / self.limit.max(1) + 1
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(
        data: Vec<T>,
        total: u64,
        params: &PaginationParams,
        message: impl Into<String>,
    ) -> Self {
        let per_page = params.limit;
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            success: true,
            message: message.into(),
            data,
            total,
            page: params.page(),
            per_page,
            total_pages,
        }
    }

    /// Convert each item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            success: self.success,
            message: self.message,
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_math() {
        let params = PaginationParams { skip: 20, limit: 10 };
        let page = Paginated::new(vec![1, 2, 3], 25, &params, "ok");

        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_skip_inside_page_rounds_down() {
        assert_eq!(PaginationParams { skip: 15, limit: 10 }.page(), 2);
        assert_eq!(PaginationParams::default().page(), 1);
    }

    #[test]
    fn test_empty_total() {
        let page: Paginated<u8> = Paginated::new(vec![], 0, &PaginationParams::default(), "ok");
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_limit_bounds_validated() {
        assert!(PaginationParams { skip: 0, limit: 0 }.validate().is_err());
        assert!(PaginationParams { skip: 0, limit: 1001 }.validate().is_err());
        assert!(PaginationParams { skip: 0, limit: 1000 }.validate().is_ok());
    }
}
