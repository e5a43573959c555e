//! Screencode HTTP server
//!
//! Actix-web boundary layer: serves the page, validates form input, and maps
//! pipeline results to JSON envelopes.

pub mod form;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use screencode_common::{AppConfig, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use state::AppState;

/// Register state, body limits and every route
pub fn configure(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let limit = state.config.max_form_bytes;
        cfg.app_data(state)
            .app_data(web::FormConfig::default().limit(limit))
            .app_data(web::PayloadConfig::new(limit))
            .service(routes::index_page)
            .service(routes::get_models)
            .service(routes::generate_description)
            .service(routes::generate_html)
            .service(routes::code_model_chat);
    }
}

/// Bind and run until the process is stopped
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = web::Data::new(AppState::new(config)?);

    info!(
        "Starting server on http://{} (inference endpoint: {})",
        bind_addr, state.config.inference_api_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(configure(state.clone()))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
