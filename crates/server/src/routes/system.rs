use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::state::AppState;
use crate::types::HealthResponse;

/// Liveness and active pipeline settings
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model: state.summarizer.model().to_string(),
        mode: state.config.pipeline_mode.as_str().to_string(),
        backend: state.summarizer.backend_name().to_string(),
        timestamp: chrono::Utc::now(),
    }))
}
