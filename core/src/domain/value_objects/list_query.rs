//! Search, sort and page parameters for list operations

use kn_shared::{Pagination, SortParams};

/// Sort columns accepted for organizations and services
pub const ENTITY_SORT_FIELDS: &[&str] = &["name", "created_at", "updated_at"];

/// Sort columns accepted for service versions
pub const VERSION_SORT_FIELDS: &[&str] = &["version", "created_at", "updated_at"];

/// Column used when no valid sort is requested
pub const DEFAULT_SORT_FIELD: &str = "updated_at";

/// Resolved list parameters handed to repositories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Free-text filter, already trimmed. Empty means no filter.
    pub search: Option<String>,
    pub sort: SortParams,
    pub pagination: Pagination,
}

impl ListQuery {
    pub fn new(search: Option<&str>, sort: SortParams, pagination: Pagination) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            search,
            sort,
            pagination,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: SortParams::resolve(None, None, ENTITY_SORT_FIELDS, DEFAULT_SORT_FIELD),
            pagination: Pagination::default(),
        }
    }
}

/// A page of results plus the total number of matches
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}
