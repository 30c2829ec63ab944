use actix_web::{http::StatusCode, post, web, HttpResponse};
use std::sync::Arc;
use tracing::{error, info};

use crate::state::AppState;
use crate::types::{SummarizeRequest, SummarizeResponse};

/// Summarize the selected text
///
/// Always answers with a `SummarizeResponse`; failures carry the pipeline's
/// error message so the caller can show it in place of the summary.
#[post("/summarize")]
pub async fn summarize(
    req: web::Json<SummarizeRequest>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let req = req.into_inner();
    let api_key = state.resolve_api_key(req.api_key.as_deref());

    info!("Summarize request received - Text length: {} chars", req.text.len());

    match state.summarizer.extract_key_points(&req.text, &api_key).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(SummarizeResponse::ok(summary))),
        Err(e) => {
            error!("Error generating summary: {}", e);
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Ok(HttpResponse::build(status).json(SummarizeResponse::failed(e.to_string(), e.kind())))
        }
    }
}
