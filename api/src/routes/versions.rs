//! Service version endpoints under `/v1/orgs/{orgId}/services/{serviceId}/versions`

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use kn_core::domain::value_objects::VERSION_SORT_FIELDS;
use kn_core::services::VersionUpdate;
use kn_shared::PaginatedResponse;

use super::services::ServicePath;
use crate::dto::{CreateVersionRequest, ListParams, UpdateVersionRequest};
use crate::handlers::error::ApiError;
use crate::handlers::extract::{parse_id, validate_request};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VersionPath {
    #[serde(rename = "orgId")]
    pub org_id: String,
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "versionId")]
    pub version_id: String,
}

impl VersionPath {
    fn ids(&self) -> Result<(Uuid, Uuid, Uuid), ApiError> {
        Ok((
            parse_id(&self.org_id, "Organization")?,
            parse_id(&self.service_id, "Service")?,
            parse_id(&self.version_id, "Service version")?,
        ))
    }
}

/// Handler for POST .../versions
///
/// A missing `releaseTimestamp` defaults to the creation time.
pub async fn create_version(
    state: web::Data<AppState>,
    path: web::Path<ServicePath>,
    body: web::Json<CreateVersionRequest>,
) -> Result<HttpResponse, ApiError> {
    let (org_id, service_id) = path.ids()?;
    validate_request(&*body, CreateVersionRequest::FIELDS)?;
    let request = body.into_inner();

    let version = state
        .catalog_service
        .create_version(
            org_id,
            service_id,
            request.version.as_deref().unwrap_or_default(),
            request.description.as_deref().unwrap_or_default(),
            request.release_timestamp,
        )
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to create service version"))?;

    Ok(HttpResponse::Created().json(version))
}

/// Handler for GET .../versions
///
/// `q` matches version prefixes.
pub async fn list_versions(
    state: web::Data<AppState>,
    path: web::Path<ServicePath>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let (org_id, service_id) = path.ids()?;
    let query = params.to_list_query(VERSION_SORT_FIELDS);

    let page = state
        .catalog_service
        .list_versions(org_id, service_id, &query)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch service versions"))?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::new(page.items, page.total, query.pagination)))
}

/// Handler for GET .../versions/{versionId}
pub async fn get_version(
    state: web::Data<AppState>,
    path: web::Path<VersionPath>,
) -> Result<HttpResponse, ApiError> {
    let (org_id, service_id, version_id) = path.ids()?;

    let version = state
        .catalog_service
        .get_version(org_id, service_id, version_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch service version"))?;

    Ok(HttpResponse::Ok().json(version))
}

/// Handler for PATCH .../versions/{versionId}
pub async fn update_version(
    state: web::Data<AppState>,
    path: web::Path<VersionPath>,
    body: web::Json<UpdateVersionRequest>,
) -> Result<HttpResponse, ApiError> {
    let (org_id, service_id, version_id) = path.ids()?;
    validate_request(&*body, UpdateVersionRequest::FIELDS)?;
    let request = body.into_inner();

    let version = state
        .catalog_service
        .update_version(
            org_id,
            service_id,
            version_id,
            VersionUpdate {
                description: request.description,
                release_timestamp: request.release_timestamp,
            },
        )
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to update service version"))?;

    Ok(HttpResponse::Ok().json(version))
}

/// Handler for DELETE .../versions/{versionId}
pub async fn delete_version(
    state: web::Data<AppState>,
    path: web::Path<VersionPath>,
) -> Result<HttpResponse, ApiError> {
    let (org_id, service_id, version_id) = path.ids()?;

    state
        .catalog_service
        .delete_version(org_id, service_id, version_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to delete service version"))?;

    Ok(HttpResponse::NoContent().finish())
}
