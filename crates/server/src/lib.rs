//! Gist HTTP server
//!
//! Actix-web front for the summarization pipeline

pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use gist_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use state::AppState;

/// Register `/api` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(routes::summarize::summarize)
            .service(routes::system::health),
    );
}

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!(
        "Starting server on {} - Model: {}, Mode: {}",
        bind_addr,
        state.summarizer.model(),
        state.config.pipeline_mode.as_str()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            // Browser extensions call from their own origin
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
