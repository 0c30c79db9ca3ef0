use serde::Deserialize;

use kn_core::domain::value_objects::{ListQuery, DEFAULT_SORT_FIELD};
use kn_shared::{Pagination, SortParams};

/// Value of `include` that adds version counts to services
pub const INCLUDE_VERSION_COUNT: &str = "versionCount";

/// Raw list query string: `q`, `sort_by`, `sort`, `page`, `per_page`, `include`.
///
/// Everything stays a string so malformed values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub sort_by: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub include: Option<String>,
}

impl ListParams {
    /// Resolve against the sort columns valid for the listed resource
    pub fn to_list_query(&self, sort_fields: &[&'static str]) -> ListQuery {
        ListQuery::new(
            self.q.as_deref(),
            SortParams::resolve(
                self.sort_by.as_deref(),
                self.sort.as_deref(),
                sort_fields,
                DEFAULT_SORT_FIELD,
            ),
            Pagination::from_query(self.page.as_deref(), self.per_page.as_deref()),
        )
    }

    /// Whether `include` lists `versionCount`
    pub fn include_version_count(&self) -> bool {
        self.include
            .as_deref()
            .is_some_and(|v| v.split(',').any(|part| part.trim() == INCLUDE_VERSION_COUNT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kn_core::domain::value_objects::ENTITY_SORT_FIELDS;
    use kn_shared::SortOrder;

    #[test]
    fn test_to_list_query_defaults() {
        let query = ListParams::default().to_list_query(ENTITY_SORT_FIELDS);
        assert_eq!(query.sort.field, "updated_at");
        assert_eq!(query.sort.order, SortOrder::Desc);
        assert_eq!(query.pagination.page, 0);
        assert_eq!(query.pagination.per_page, 10);
        assert!(query.search.is_none());
    }

    #[test]
    fn test_invalid_sort_falls_back() {
        let params = ListParams {
            sort_by: Some("password".into()),
            sort: Some("asc".into()),
            ..Default::default()
        };
        let query = params.to_list_query(ENTITY_SORT_FIELDS);
        assert_eq!(query.sort.field, "updated_at");
        assert_eq!(query.sort.order, SortOrder::Desc);
    }

    #[test]
    fn test_include_version_count() {
        let params = ListParams {
            include: Some("owner, versionCount".into()),
            ..Default::default()
        };
        assert!(params.include_version_count());
        assert!(!ListParams::default().include_version_count());
    }
}
