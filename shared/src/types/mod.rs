//! Type definitions shared by the API and persistence layers
//!
//! - `pagination` - page parameters and paginated bodies
//! - `response` - error and health bodies
//! - `sort` - whitelisted sort parameters

pub mod pagination;
pub mod response;
pub mod sort;

pub use pagination::{PageMeta, PaginatedResponse, Pagination, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use response::{ErrorResponse, HealthResponse};
pub use sort::{SortOrder, SortParams};
