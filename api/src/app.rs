//! Application factory
//!
//! Builds the actix-web `App` served by the binary and exercised by the
//! integration tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::ApiError;
use crate::handlers::extract::{json_config, query_config};
use crate::middleware::{create_cors, JwtAuth, OrgAccess, TraceIdScope};
use crate::routes::{health, organizations, services, users, versions};
use crate::state::AppState;

/// Create the application with all routes and middleware.
///
/// Middleware runs outermost first: request logging, CORS, then the trace id
/// scope that error bodies read from.
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(TraceIdScope)
        .wrap(create_cors())
        .wrap(TracingLogger::default())
        .route("/", web::get().to(health::health_check))
        .service(
            web::scope("/v1")
                .service(
                    web::scope("/user")
                        .route("/register", web::post().to(users::register))
                        .route("/login", web::post().to(users::login))
                        .route("/logout", web::post().to(users::logout)),
                )
                .service(org_routes()),
        )
        .default_service(web::to(not_found))
}

/// `/orgs` and everything beneath it. All of it requires a valid token;
/// `/orgs/{orgId}/...` additionally requires membership.
fn org_routes() -> actix_web::Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    web::scope("/orgs")
        .wrap(JwtAuth)
        .route("", web::post().to(organizations::create_organization))
        .route("", web::get().to(organizations::list_organizations))
        .service(
            web::scope("/{orgId}")
                .wrap(OrgAccess)
                .route("", web::get().to(organizations::get_organization))
                .route("", web::put().to(organizations::update_organization))
                .route("", web::delete().to(organizations::delete_organization))
                .service(
                    web::scope("/services")
                        .route("", web::post().to(services::create_service))
                        .route("", web::get().to(services::list_services))
                        .service(
                            web::scope("/{serviceId}")
                                .route("", web::get().to(services::get_service))
                                .route("", web::put().to(services::update_service))
                                .route("", web::delete().to(services::delete_service))
                                .service(
                                    web::scope("/versions")
                                        .route("", web::post().to(versions::create_version))
                                        .route("", web::get().to(versions::list_versions))
                                        .route("/{versionId}", web::get().to(versions::get_version))
                                        .route(
                                            "/{versionId}",
                                            web::patch().to(versions::update_version),
                                        )
                                        .route(
                                            "/{versionId}",
                                            web::delete().to(versions::delete_version),
                                        ),
                                ),
                        ),
                ),
        )
}

async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::not_found("Resource"))
}
