use actix_web::HttpResponse;

use crate::models::HealthResponse;

/// Liveness probe
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "Service is running".to_string(),
    })
}
