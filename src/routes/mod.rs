use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use gym_site_mailer::EmailClient;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, services::ServeDir,
    trace::TraceLayer,
};

pub mod contact;
pub mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mailer: Arc<dyn EmailClient>,
}

pub fn router(app_state: AppState) -> Router {
    let router = Router::new()
        // Health check endpoint (no state required)
        .route("/health", get(health::health))
        // Contact form, Spanish path used by the site plus an English alias
        .route("/api/enviar", post(contact::action))
        .route("/api/send", post(contact::action));

    // Built marketing pages, when configured
    let router = match &app_state.config.server.public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(crate::error::panic_response))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
}
