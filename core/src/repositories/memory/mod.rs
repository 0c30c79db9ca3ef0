//! In-memory implementation of every repository trait.
//!
//! All tables live behind one `tokio::sync::RwLock`, so multi-table writes
//! (organization plus creator membership, cascading deletes) are atomic.
//! State is lost on restart. Used by tests and by `STORAGE_BACKEND=memory`.

mod organization;
mod service;
mod token;
mod user;


use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use kn_shared::{Pagination, SortOrder, SortParams};

use crate::domain::entities::{Membership, Organization, RevokedToken, Service, ServiceVersion, User};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub users: HashMap<Uuid, User>,
    pub organizations: HashMap<Uuid, Organization>,
    pub memberships: HashMap<(Uuid, Uuid), Membership>,
    pub services: HashMap<Uuid, Service>,
    pub versions: HashMap<Uuid, ServiceVersion>,
    pub revoked_tokens: HashMap<String, RevokedToken>,
}

impl Tables {
    /// Remove a service and its versions
    fn remove_service(&mut self, service_id: Uuid) -> bool {
        self.versions.retain(|_, v| v.service_id != service_id);
        self.services.remove(&service_id).is_some()
    }

    /// Remove an organization and everything hanging off it
    fn remove_organization(&mut self, organization_id: Uuid) -> bool {
        let service_ids: HashSet<Uuid> = self
            .services
            .values()
            .filter(|s| s.organization_id == organization_id)
            .map(|s| s.id)
            .collect();
        for id in service_ids {
            self.remove_service(id);
        }
        self.memberships
            .retain(|(_, org_id), _| *org_id != organization_id);
        self.organizations.remove(&organization_id).is_some()
    }
}

/// Shared in-memory datastore
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of revocation rows, expired or not
    pub async fn revoked_token_count(&self) -> usize {
        self.tables.read().await.revoked_tokens.len()
    }
}

/// Value a row is ordered by
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Time(DateTime<Utc>),
}

trait Sortable {
    fn sort_key(&self, field: &str) -> SortKey;

    /// Tiebreaker for rows with equal sort keys
    fn id(&self) -> Uuid;
}

impl Sortable for Organization {
    fn id(&self) -> Uuid {
        self.id
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "name" => SortKey::Text(self.name.clone()),
            "created_at" => SortKey::Time(self.created_at),
            _ => SortKey::Time(self.updated_at),
        }
    }
}

impl Sortable for Service {
    fn id(&self) -> Uuid {
        self.id
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "name" => SortKey::Text(self.name.clone()),
            "created_at" => SortKey::Time(self.created_at),
            _ => SortKey::Time(self.updated_at),
        }
    }
}

impl Sortable for ServiceVersion {
    fn id(&self) -> Uuid {
        self.id
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "version" => SortKey::Text(self.version.clone()),
            "created_at" => SortKey::Time(self.created_at),
            _ => SortKey::Time(self.updated_at),
        }
    }
}

/// Sort, count and slice rows the way the SQL backends do
fn paginate<T: Sortable>(mut rows: Vec<T>, sort: &SortParams, pagination: &Pagination) -> (Vec<T>, u64) {
    rows.sort_by(|a, b| {
        let ordering = a.sort_key(sort.field).cmp(&b.sort_key(sort.field));
        let ordering = match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id().cmp(&b.id()))
    });

    let total = rows.len() as u64;
    let page = rows
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect();
    (page, total)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.to_lowercase().starts_with(&prefix.to_lowercase())
}
