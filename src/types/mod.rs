//! Response envelopes and request windows shared by all endpoints.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginationParams};
pub use response::ApiResponse;
