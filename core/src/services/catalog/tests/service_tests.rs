use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use kn_shared::{Pagination, SortParams};

use crate::clock::{Clock, ManualClock};
use crate::domain::value_objects::{ListQuery, DEFAULT_SORT_FIELD, VERSION_SORT_FIELDS};
use crate::errors::DomainError;
use crate::repositories::MemoryStore;
use crate::services::catalog::{CatalogService, VersionUpdate};
use crate::services::organization::OrganizationService;

struct Harness {
    catalog: CatalogService,
    orgs: OrganizationService,
    clock: Arc<ManualClock>,
}

fn setup() -> Harness {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
    let store = Arc::new(MemoryStore::new());
    Harness {
        catalog: CatalogService::new(store.clone(), store.clone(), clock.clone()),
        orgs: OrganizationService::new(store, clock.clone()),
        clock,
    }
}

async fn org(h: &Harness) -> Uuid {
    h.orgs
        .create(Uuid::new_v4(), "Acme", "Acme organization")
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_service_crud() {
    let h = setup();
    let org_id = org(&h).await;

    let service = h.catalog.create_service(org_id, "payments", "Payment processing").await.unwrap();
    assert_eq!(service.organization_id, org_id);
    assert_eq!(service.metadata.version_count, None);

    let updated = h
        .catalog
        .update_service(org_id, service.id, "billing", "Billing and invoices")
        .await
        .unwrap();
    assert_eq!(updated.name, "billing");

    h.catalog.delete_service(org_id, service.id).await.unwrap();
    let err = h.catalog.get_service(org_id, service.id, false).await.unwrap_err();
    assert_eq!(err.to_string(), "Service not found");
}

#[tokio::test]
async fn test_service_from_other_org_is_not_found() {
    let h = setup();
    let org_a = org(&h).await;
    let org_b = org(&h).await;
    let service = h.catalog.create_service(org_a, "payments", "Payment processing").await.unwrap();

    assert!(matches!(
        h.catalog.get_service(org_b, service.id, false).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        h.catalog.create_version(org_b, service.id, "1.0.0", "First release", None).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_version_count_is_included_on_request() {
    let h = setup();
    let org_id = org(&h).await;
    let service = h.catalog.create_service(org_id, "payments", "Payment processing").await.unwrap();
    h.catalog.create_service(org_id, "search", "Search service").await.unwrap();
    for v in ["1.0.0", "1.0.1"] {
        h.catalog
            .create_version(org_id, service.id, v, "Release notes here", None)
            .await
            .unwrap();
    }

    let one = h.catalog.get_service(org_id, service.id, true).await.unwrap();
    assert_eq!(one.metadata.version_count, Some(2));

    let page = h.catalog.list_services(org_id, &ListQuery::default(), true).await.unwrap();
    assert_eq!(page.total, 2);
    let counts: Vec<_> = page
        .items
        .iter()
        .map(|s| (s.name.as_str(), s.metadata.version_count))
        .collect();
    assert!(counts.contains(&("payments", Some(2))));
    assert!(counts.contains(&("search", Some(0))));

    let page = h.catalog.list_services(org_id, &ListQuery::default(), false).await.unwrap();
    assert!(page.items.iter().all(|s| s.metadata.version_count.is_none()));
}

#[tokio::test]
async fn test_version_lifecycle() {
    let h = setup();
    let org_id = org(&h).await;
    let service = h.catalog.create_service(org_id, "payments", "Payment processing").await.unwrap();

    let version = h
        .catalog
        .create_version(org_id, service.id, "1.0.0", "First release", None)
        .await
        .unwrap();
    assert_eq!(version.release_timestamp, h.clock.now());

    let err = h
        .catalog
        .create_version(org_id, service.id, "1.0.0", "Duplicate release", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    h.clock.advance(Duration::minutes(1));
    let release = h.clock.now() + Duration::days(1);
    let patched = h
        .catalog
        .update_version(
            org_id,
            service.id,
            version.id,
            VersionUpdate {
                description: None,
                release_timestamp: Some(release),
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.description, "First release");
    assert_eq!(patched.release_timestamp, release);
    assert!(patched.updated_at > version.updated_at);

    h.catalog.delete_version(org_id, service.id, version.id).await.unwrap();
    let err = h.catalog.get_version(org_id, service.id, version.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Service version not found");
}

#[tokio::test]
async fn test_invalid_semver_is_rejected() {
    let h = setup();
    let org_id = org(&h).await;
    let service = h.catalog.create_service(org_id, "payments", "Payment processing").await.unwrap();

    let err = h
        .catalog
        .create_version(org_id, service.id, "v1", "Bad version string", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_list_versions_by_prefix() {
    let h = setup();
    let org_id = org(&h).await;
    let service = h.catalog.create_service(org_id, "payments", "Payment processing").await.unwrap();
    for v in ["1.0.0", "1.2.0", "2.0.0"] {
        h.catalog
            .create_version(org_id, service.id, v, "Release notes here", None)
            .await
            .unwrap();
    }

    let query = ListQuery::new(
        Some("1."),
        SortParams::resolve(Some("version"), Some("desc"), VERSION_SORT_FIELDS, DEFAULT_SORT_FIELD),
        Pagination::default(),
    );
    let page = h.catalog.list_versions(org_id, service.id, &query).await.unwrap();
    let versions: Vec<_> = page.items.iter().map(|v| v.version.as_str()).collect();
    assert_eq!(versions, vec!["1.2.0", "1.0.0"]);
}
