//! Integration tests for service and service version endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{bearer, organization_of, service_in, signed_in_user, test_state};
use kn_api::create_app;

#[actix_web::test]
async fn test_service_crud() {
    let state = test_state();
    let (ada, token) = signed_in_user(&state, "ada@example.com").await;
    let org = organization_of(&state, &ada, "Acme Corp").await;
    let app = test::init_service(create_app(state)).await;
    let base = format!("/v1/orgs/{}/services", org.id);

    let req = test::TestRequest::post()
        .uri(&base)
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Billing", "description": "Invoices and payments" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["organizationId"], org.id.to_string());
    let service_uri = format!("{}/{}", base, created["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&service_uri)
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Billing v2", "description": "Invoices, payments and refunds" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Billing v2");

    let req = test::TestRequest::get()
        .uri(&service_uri)
        .insert_header(bearer(&token))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["description"], "Invoices, payments and refunds");

    let req = test::TestRequest::delete()
        .uri(&service_uri)
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&service_uri)
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Service not found");
}

#[actix_web::test]
async fn test_service_not_found_cases() {
    let state = test_state();
    let (ada, token) = signed_in_user(&state, "ada@example.com").await;
    let org = organization_of(&state, &ada, "Acme Corp").await;
    let other_org = organization_of(&state, &ada, "Globex").await;
    let foreign = service_in(&state, &other_org, "Elsewhere").await;
    let app = test::init_service(create_app(state)).await;

    for service_id in [Uuid::new_v4().to_string(), "garbage".to_string(), foreign.id.to_string()] {
        let req = test::TestRequest::get()
            .uri(&format!("/v1/orgs/{}/services/{}", org.id, service_id))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", service_id);
    }
}

#[actix_web::test]
async fn test_list_services_with_pagination_and_version_count() {
    let state = test_state();
    let (ada, token) = signed_in_user(&state, "ada@example.com").await;
    let org = organization_of(&state, &ada, "Acme Corp").await;
    let billing = service_in(&state, &org, "Billing").await;
    service_in(&state, &org, "Catalog").await;
    service_in(&state, &org, "Auth").await;
    for version in ["1.0.0", "1.1.0"] {
        state
            .catalog_service
            .create_version(org.id, billing.id, version, "A release used in tests", None)
            .await
            .unwrap();
    }
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/v1/orgs/{}/services?sort_by=name&sort=asc&per_page=2&page=0&include=versionCount",
            org.id
        ))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["meta"],
        json!({ "totalCount": 3, "totalPages": 2, "currentPage": 0, "nextPage": 1 })
    );
    assert_eq!(body["data"][0]["name"], "Auth");
    assert_eq!(body["data"][0]["metadata"]["versionCount"], 0);
    assert_eq!(body["data"][1]["name"], "Billing");
    assert_eq!(body["data"][1]["metadata"]["versionCount"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("/v1/orgs/{}/services?sort_by=name&sort=asc&per_page=2&page=1", org.id))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["meta"]["nextPage"], 0);
    assert_eq!(body["data"][0]["name"], "Catalog");
    assert!(body["data"][0]["metadata"].get("versionCount").is_none());
}

#[actix_web::test]
async fn test_version_lifecycle() {
    let state = test_state();
    let (ada, token) = signed_in_user(&state, "ada@example.com").await;
    let org = organization_of(&state, &ada, "Acme Corp").await;
    let service = service_in(&state, &org, "Billing").await;
    let app = test::init_service(create_app(state)).await;
    let base = format!("/v1/orgs/{}/services/{}/versions", org.id, service.id);

    let req = test::TestRequest::post()
        .uri(&base)
        .insert_header(bearer(&token))
        .set_json(json!({
            "version": "1.0.0",
            "description": "First public release",
            "releaseTimestamp": "2024-01-15T10:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["serviceId"], service.id.to_string());
    assert_eq!(created["releaseTimestamp"], "2024-01-15T10:00:00Z");
    let version_uri = format!("{}/{}", base, created["id"].as_str().unwrap());

    // Same version string again
    let req = test::TestRequest::post()
        .uri(&base)
        .insert_header(bearer(&token))
        .set_json(json!({ "version": "1.0.0", "description": "First public release" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "Conflict");

    let req = test::TestRequest::patch()
        .uri(&version_uri)
        .insert_header(bearer(&token))
        .set_json(json!({ "description": "First public release, patched notes" }))
        .to_request();
    let patched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(patched["description"], "First public release, patched notes");
    assert_eq!(patched["version"], "1.0.0");
    assert_eq!(patched["releaseTimestamp"], "2024-01-15T10:00:00Z");

    let req = test::TestRequest::delete()
        .uri(&version_uri)
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&version_uri)
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Service version not found");
}

#[actix_web::test]
async fn test_version_validation_and_search() {
    let state = test_state();
    let (ada, token) = signed_in_user(&state, "ada@example.com").await;
    let org = organization_of(&state, &ada, "Acme Corp").await;
    let service = service_in(&state, &org, "Billing").await;
    for version in ["1.0.0", "1.2.0", "2.0.0-beta.1"] {
        state
            .catalog_service
            .create_version(org.id, service.id, version, "A release used in tests", None)
            .await
            .unwrap();
    }
    let app = test::init_service(create_app(state)).await;
    let base = format!("/v1/orgs/{}/services/{}/versions", org.id, service.id);

    let req = test::TestRequest::post()
        .uri(&base)
        .insert_header(bearer(&token))
        .set_json(json!({ "version": "v1", "description": "Not a semantic version" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Version must be a valid semantic version (e.g., 1.0.0, 2.1.3-beta)"
    );

    let req = test::TestRequest::get()
        .uri(&format!("{}?q=1.&sort_by=version&sort=asc", base))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["meta"]["totalCount"], 2);
    assert_eq!(body["data"][0]["version"], "1.0.0");
    assert_eq!(body["data"][1]["version"], "1.2.0");
}

#[actix_web::test]
async fn test_versions_of_missing_service() {
    let state = test_state();
    let (ada, token) = signed_in_user(&state, "ada@example.com").await;
    let org = organization_of(&state, &ada, "Acme Corp").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri(&format!("/v1/orgs/{}/services/{}/versions", org.id, Uuid::new_v4()))
        .insert_header(bearer(&token))
        .set_json(json!({ "version": "1.0.0", "description": "Release for nothing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Service not found");
}
