//! Integration tests for organization endpoints and the membership gate

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{bearer, organization_of, service_in, signed_in_user, test_state};
use kn_api::create_app;

#[actix_web::test]
async fn test_create_and_get_organization() {
    let state = test_state();
    let (_, token) = signed_in_user(&state, "ada@example.com").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/v1/orgs")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Acme", "description": "Makers of everything" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["name"], "Acme");

    let id = created["id"].as_str().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/v1/orgs/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["description"], "Makers of everything");
}

#[actix_web::test]
async fn test_create_organization_validation() {
    let state = test_state();
    let (_, token) = signed_in_user(&state, "ada@example.com").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/v1/orgs")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Ac", "description": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Name should be between 3 to 100 characters");
    assert_eq!(
        body["details"]["description"][0],
        "Description should be between 10 to 1000 characters"
    );
}

#[actix_web::test]
async fn test_list_only_member_organizations() {
    let state = test_state();
    let (ada, ada_token) = signed_in_user(&state, "ada@example.com").await;
    let (bob, _) = signed_in_user(&state, "bob@example.com").await;
    organization_of(&state, &ada, "Acme Corp").await;
    organization_of(&state, &ada, "Globex").await;
    organization_of(&state, &bob, "Initech").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/v1/orgs?sort_by=name&sort=asc")
        .insert_header(bearer(&ada_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["meta"]["totalCount"], 2);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Acme Corp", "Globex"]);

    let req = test::TestRequest::get()
        .uri("/v1/orgs?q=glob")
        .insert_header(bearer(&ada_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["meta"]["totalCount"], 1);
    assert_eq!(body["data"][0]["name"], "Globex");
}

#[actix_web::test]
async fn test_non_member_is_forbidden() {
    let state = test_state();
    let (ada, _) = signed_in_user(&state, "ada@example.com").await;
    let (_, bob_token) = signed_in_user(&state, "bob@example.com").await;
    let org = organization_of(&state, &ada, "Acme Corp").await;
    let app = test::init_service(create_app(state)).await;

    for uri in [
        format!("/v1/orgs/{}", org.id),
        format!("/v1/orgs/{}/services", org.id),
        format!("/v1/orgs/{}", Uuid::new_v4()),
        "/v1/orgs/not-a-uuid".to_string(),
    ] {
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&bob_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["type"], "Forbidden");
        assert_eq!(body["message"], "You are not authorized to perform the request");
        assert!(body["traceId"].as_str().is_some_and(|id| !id.is_empty()));
    }
}

#[actix_web::test]
async fn test_update_and_delete_organization() {
    let state = test_state();
    let (ada, token) = signed_in_user(&state, "ada@example.com").await;
    let org = organization_of(&state, &ada, "Acme Corp").await;
    let service = service_in(&state, &org, "Billing").await;
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::put()
        .uri(&format!("/v1/orgs/{}", org.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Acme Industries", "description": "Renamed organization" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Acme Industries");

    let req = test::TestRequest::delete()
        .uri(&format!("/v1/orgs/{}", org.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    // Membership went with the organization
    let req = test::TestRequest::get()
        .uri(&format!("/v1/orgs/{}", org.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    assert!(state
        .catalog_service
        .get_service(org.id, service.id, false)
        .await
        .is_err());
}
