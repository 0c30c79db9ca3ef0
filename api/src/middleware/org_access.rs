//! Organization membership gate.
//!
//! Wraps every route under `/orgs/{orgId}`. Must sit inside [`JwtAuth`] so the
//! caller's [`AuthContext`] is already present.
//!
//! [`JwtAuth`]: super::auth::JwtAuth

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use kn_core::errors::DomainError;

use super::auth::AuthContext;
use crate::handlers::error::ApiError;
use crate::state::AppState;

/// Path segment holding the organization id
pub const ORG_ID_PARAM: &str = "orgId";

/// Membership gate middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct OrgAccess;

impl<S, B> Transform<S, ServiceRequest> for OrgAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OrgAccessMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OrgAccessMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct OrgAccessMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for OrgAccessMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authorize_request(&req).await {
                Ok(()) => service.call(req).await.map(ServiceResponse::map_into_left_body),
                Err(e) => Ok(req.error_response(e).map_into_right_body()),
            }
        })
    }
}

/// Check that the caller belongs to the organization named in the path
async fn authorize_request(req: &ServiceRequest) -> Result<(), ApiError> {
    let user_id = req
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.user_id)
        .ok_or_else(|| ApiError::unauthorized("Authorization header required"))?;

    // An id that cannot parse names no organization the caller belongs to
    let organization_id = req
        .match_info()
        .get(ORG_ID_PARAM)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(ApiError::forbidden)?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::internal("Application state is not configured"))?;

    match state.membership_gate.authorize(user_id, organization_id).await {
        Ok(()) => Ok(()),
        Err(DomainError::Forbidden) => {
            tracing::info!(
                "User {} denied access to organization {}",
                user_id,
                organization_id
            );
            Err(ApiError::forbidden())
        }
        Err(e) => Err(ApiError::from_domain(e, "Failed to check organization access")),
    }
}
