use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/api/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "Battle.net API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/api/health/ready")]
pub async fn health_check_ready(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let db_health = state.health.health_check().await;
    if let Err(e) = &db_health {
        log::error!("Readiness probe failed: {}", e);
    }

    let response = serde_json::json!({
        "status": if db_health.is_ok() { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "postgres": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
