use actix_web::{HttpResponse, Responder, get};

/// Liveness probe; touches no collaborator.
#[get("/health")]
pub async fn get_health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
