//! Service endpoints under `/v1/orgs/{orgId}/services`

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use kn_core::domain::value_objects::ENTITY_SORT_FIELDS;
use kn_shared::PaginatedResponse;

use super::organizations::OrgPath;
use crate::dto::{EntityRequest, ListParams};
use crate::handlers::error::ApiError;
use crate::handlers::extract::{parse_id, validate_request};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ServicePath {
    #[serde(rename = "orgId")]
    pub org_id: String,
    #[serde(rename = "serviceId")]
    pub service_id: String,
}

impl ServicePath {
    pub fn ids(&self) -> Result<(Uuid, Uuid), ApiError> {
        Ok((
            parse_id(&self.org_id, "Organization")?,
            parse_id(&self.service_id, "Service")?,
        ))
    }
}

/// Handler for POST /v1/orgs/{orgId}/services
pub async fn create_service(
    state: web::Data<AppState>,
    path: web::Path<OrgPath>,
    body: web::Json<EntityRequest>,
) -> Result<HttpResponse, ApiError> {
    let org_id = parse_id(&path.org_id, "Organization")?;
    validate_request(&*body, EntityRequest::FIELDS)?;
    let (name, description) = body.fields();

    let service = state
        .catalog_service
        .create_service(org_id, name, description)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to create service"))?;

    Ok(HttpResponse::Created().json(service))
}

/// Handler for GET /v1/orgs/{orgId}/services
///
/// `include=versionCount` fills `metadata.versionCount` on every item.
pub async fn list_services(
    state: web::Data<AppState>,
    path: web::Path<OrgPath>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let org_id = parse_id(&path.org_id, "Organization")?;
    let query = params.to_list_query(ENTITY_SORT_FIELDS);

    let page = state
        .catalog_service
        .list_services(org_id, &query, params.include_version_count())
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch services"))?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::new(page.items, page.total, query.pagination)))
}

/// Handler for GET /v1/orgs/{orgId}/services/{serviceId}
pub async fn get_service(
    state: web::Data<AppState>,
    path: web::Path<ServicePath>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let (org_id, service_id) = path.ids()?;

    let service = state
        .catalog_service
        .get_service(org_id, service_id, params.include_version_count())
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch service"))?;

    Ok(HttpResponse::Ok().json(service))
}

/// Handler for PUT /v1/orgs/{orgId}/services/{serviceId}
pub async fn update_service(
    state: web::Data<AppState>,
    path: web::Path<ServicePath>,
    body: web::Json<EntityRequest>,
) -> Result<HttpResponse, ApiError> {
    let (org_id, service_id) = path.ids()?;
    validate_request(&*body, EntityRequest::FIELDS)?;
    let (name, description) = body.fields();

    let service = state
        .catalog_service
        .update_service(org_id, service_id, name, description)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to update service"))?;

    Ok(HttpResponse::Ok().json(service))
}

/// Handler for DELETE /v1/orgs/{orgId}/services/{serviceId}
pub async fn delete_service(
    state: web::Data<AppState>,
    path: web::Path<ServicePath>,
) -> Result<HttpResponse, ApiError> {
    let (org_id, service_id) = path.ids()?;

    state
        .catalog_service
        .delete_service(org_id, service_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to delete service"))?;

    Ok(HttpResponse::NoContent().finish())
}
