//! Value objects representing immutable domain concepts.

pub mod list_query;

pub use list_query::{
    ListQuery, Page, DEFAULT_SORT_FIELD, ENTITY_SORT_FIELDS, VERSION_SORT_FIELDS,
};
