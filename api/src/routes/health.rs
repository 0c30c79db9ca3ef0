use actix_web::HttpResponse;

use kn_shared::HealthResponse;

/// Handler for GET /
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::up())
}
