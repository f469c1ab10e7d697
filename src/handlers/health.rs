use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Server is running")
    )
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Server is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
