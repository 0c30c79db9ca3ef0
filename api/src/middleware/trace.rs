//! Request id propagation into error bodies.
//!
//! `TracingLogger` assigns every request a `RequestId`. This middleware makes
//! it available to [`current_trace_id`] for the lifetime of the request.
//! Inner middleware render their own rejections so that the id is still in
//! scope when `ApiError::error_response` runs.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use tracing_actix_web::RequestId;
use uuid::Uuid;

tokio::task_local! {
    static TRACE_ID: String;
}

/// Request id of the request being served on this task, if any
pub fn current_trace_id() -> Option<String> {
    TRACE_ID.try_with(|id| id.clone()).ok()
}

/// Middleware factory; register it inside `TracingLogger`
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceIdScope;

impl<S, B> Transform<S, ServiceRequest> for TraceIdScope
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceIdScopeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceIdScopeMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct TraceIdScopeMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TraceIdScopeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let trace_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        // The request must stay uniquely owned: the router mutates its match info
        Box::pin(TRACE_ID.scope(trace_id, async move { service.call(req).await }))
    }
}
