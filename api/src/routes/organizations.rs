//! Organization endpoints
//!
//! Creation and listing need only authentication; everything under
//! `/orgs/{orgId}` has already passed the membership gate.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use kn_core::domain::value_objects::ENTITY_SORT_FIELDS;
use kn_shared::PaginatedResponse;

use crate::dto::{EntityRequest, ListParams};
use crate::handlers::error::ApiError;
use crate::handlers::extract::{parse_id, validate_request};
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrgPath {
    #[serde(rename = "orgId")]
    pub org_id: String,
}

/// Handler for POST /v1/orgs
pub async fn create_organization(
    auth: AuthContext,
    state: web::Data<AppState>,
    body: web::Json<EntityRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body, EntityRequest::FIELDS)?;
    let (name, description) = body.fields();

    let organization = state
        .organization_service
        .create(auth.user_id, name, description)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to create organization"))?;

    Ok(HttpResponse::Created().json(organization))
}

/// Handler for GET /v1/orgs
pub async fn list_organizations(
    auth: AuthContext,
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let query = params.to_list_query(ENTITY_SORT_FIELDS);

    let page = state
        .organization_service
        .list_for_user(auth.user_id, &query)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch organizations"))?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::new(page.items, page.total, query.pagination)))
}

/// Handler for GET /v1/orgs/{orgId}
pub async fn get_organization(
    state: web::Data<AppState>,
    path: web::Path<OrgPath>,
) -> Result<HttpResponse, ApiError> {
    let org_id = parse_id(&path.org_id, "Organization")?;

    let organization = state
        .organization_service
        .get(org_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch organization"))?;

    Ok(HttpResponse::Ok().json(organization))
}

/// Handler for PUT /v1/orgs/{orgId}
pub async fn update_organization(
    state: web::Data<AppState>,
    path: web::Path<OrgPath>,
    body: web::Json<EntityRequest>,
) -> Result<HttpResponse, ApiError> {
    let org_id = parse_id(&path.org_id, "Organization")?;
    validate_request(&*body, EntityRequest::FIELDS)?;
    let (name, description) = body.fields();

    let organization = state
        .organization_service
        .update(org_id, name, description)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to update organization"))?;

    Ok(HttpResponse::Ok().json(organization))
}

/// Handler for DELETE /v1/orgs/{orgId}
///
/// Removes memberships, services and versions along with the organization.
pub async fn delete_organization(
    state: web::Data<AppState>,
    path: web::Path<OrgPath>,
) -> Result<HttpResponse, ApiError> {
    let org_id = parse_id(&path.org_id, "Organization")?;

    state
        .organization_service
        .delete(org_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to delete organization"))?;

    Ok(HttpResponse::NoContent().finish())
}
