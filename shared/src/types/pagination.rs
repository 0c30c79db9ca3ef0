//! Pagination types for list endpoints
//!
//! Pages are 0-indexed. Out-of-range page sizes are replaced by the maximum.

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size accepted
pub const MAX_PER_PAGE: u32 = 100;

/// Sanitized pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (0-indexed)
    pub page: u32,

    /// Number of items per page
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Create a new pagination, replacing out-of-range sizes with the maximum
    pub fn new(page: u32, per_page: u32) -> Self {
        let per_page = if (1..=MAX_PER_PAGE).contains(&per_page) {
            per_page
        } else {
            MAX_PER_PAGE
        };
        Self { page, per_page }
    }

    /// Parse raw `page` / `per_page` query values.
    ///
    /// Unparsable values fall back to the defaults, negative pages become 0
    /// and sizes outside `1..=100` become 100.
    pub fn from_query(page: Option<&str>, per_page: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(0)
            .clamp(0, u32::MAX as i64) as u32;

        let per_page = match per_page {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(n) if (1..=MAX_PER_PAGE as i64).contains(&n) => n as u32,
                Ok(_) => MAX_PER_PAGE,
                Err(_) => DEFAULT_PER_PAGE,
            },
            None => DEFAULT_PER_PAGE,
        };

        Self { page, per_page }
    }

    /// Offset for database queries
    pub fn offset(&self) -> i64 {
        self.page as i64 * self.per_page as i64
    }

    /// Limit for database queries
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Pagination metadata returned with every list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u32,
    /// Next page index, or 0 when this is the last page
    pub next_page: u32,
}

impl PageMeta {
    /// Compute metadata for a page of a result set of `total_count` rows
    pub fn new(total_count: u64, pagination: Pagination) -> Self {
        let per_page = u64::from(pagination.per_page.max(1));
        let total_pages = total_count.div_ceil(per_page);
        let next_page = if u64::from(pagination.page) + 1 < total_pages {
            pagination.page + 1
        } else {
            0
        };

        Self {
            total_count,
            total_pages,
            current_page: pagination.page,
            next_page,
        }
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, total_count: u64, pagination: Pagination) -> Self {
        Self {
            meta: PageMeta::new(total_count, pagination),
            data,
        }
    }

    /// Transform the data items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            meta: self.meta,
            data: self.data.into_iter().map(f).collect(),
        }
    }

    /// Check if the page is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
