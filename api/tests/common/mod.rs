//! Shared setup for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use kn_api::{AppState, Repositories};
use kn_core::clock::SystemClock;
use kn_core::repositories::MemoryStore;
use kn_core::services::{AuthServiceConfig, TokenServiceConfig};
use kn_core::{Organization, Service, User};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "Secr3t!pass";

/// Application state over a fresh in-memory store, with cheap bcrypt
pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Repositories::in_memory(MemoryStore::new()),
        TokenServiceConfig::new(TEST_SECRET),
        AuthServiceConfig { bcrypt_cost: 4 },
        Arc::new(SystemClock),
    ))
}

/// Register a user and return it with a fresh access token
pub async fn signed_in_user(state: &AppState, email: &str) -> (User, String) {
    let user = state
        .auth_service
        .register(email, "Test User", TEST_PASSWORD)
        .await
        .unwrap();
    let token = state.auth_service.login(email, TEST_PASSWORD).await.unwrap();
    (user, token)
}

pub async fn organization_of(state: &AppState, user: &User, name: &str) -> Organization {
    state
        .organization_service
        .create(user.id, name, "An organization used in tests")
        .await
        .unwrap()
}

pub async fn service_in(state: &AppState, organization: &Organization, name: &str) -> Service {
    state
        .catalog_service
        .create_service(organization.id, name, "A service used in tests")
        .await
        .unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
