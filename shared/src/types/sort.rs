//! Sort parameters with whitelisted columns

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Resolved sort column and direction.
///
/// `field` is always one of the whitelisted column names handed to
/// [`SortParams::resolve`], so it is safe to splice into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortParams {
    pub field: &'static str,
    pub order: SortOrder,
}

impl SortParams {
    /// Resolve raw `sort_by` / `sort` values against a whitelist.
    ///
    /// Any unknown field or direction resets both to `default_field` and
    /// descending order.
    pub fn resolve(
        sort_by: Option<&str>,
        sort: Option<&str>,
        valid_fields: &[&'static str],
        default_field: &'static str,
    ) -> Self {
        let fallback = Self {
            field: default_field,
            order: SortOrder::Desc,
        };

        let field = match sort_by {
            Some(name) => match valid_fields.iter().find(|f| **f == name) {
                Some(field) => *field,
                None => return fallback,
            },
            None => default_field,
        };

        let order = match sort {
            Some("asc") => SortOrder::Asc,
            Some("desc") | None => SortOrder::Desc,
            Some(_) => return fallback,
        };

        Self { field, order }
    }
}
