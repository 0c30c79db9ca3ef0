//! PostgreSQL implementations of the repository traits

mod organization_repository_impl;
mod revoked_token_repository_impl;
mod service_repository_impl;
mod service_version_repository_impl;
mod user_repository_impl;

pub use organization_repository_impl::PgOrganizationRepository;
pub use revoked_token_repository_impl::PgRevokedTokenRepository;
pub use service_repository_impl::PgServiceRepository;
pub use service_version_repository_impl::PgServiceVersionRepository;
pub use user_repository_impl::PgUserRepository;

use kn_core::errors::DomainError;
use kn_shared::SortParams;

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Log a driver error and wrap it as a persistence failure
pub(crate) fn persistence_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!("{}: {}", context, error);
    DomainError::persistence(format!("{}: {}", context, error))
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

/// `ORDER BY` clause for a whitelisted sort, with `id` as a tiebreaker
pub(crate) fn order_by(alias: &str, sort: &SortParams) -> String {
    format!(
        "ORDER BY {alias}.{field} {order}, {alias}.id ASC",
        alias = alias,
        field = sort.field,
        order = sort.order.as_sql()
    )
}

/// Escape LIKE wildcards so user input matches literally
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%term%` pattern for ILIKE substring search
pub(crate) fn contains_pattern(search: Option<&str>) -> Option<String> {
    search.map(|s| format!("%{}%", escape_like(s)))
}

/// `term%` pattern for ILIKE prefix search
pub(crate) fn prefix_pattern(search: Option<&str>) -> Option<String> {
    search.map(|s| format!("{}%", escape_like(s)))
}
