//! HTTP router setup.

use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/projects", post(handlers::create_project))
        .route("/projects/{id}", patch(handlers::update_project))
        .route("/projects/{id}", delete(handlers::delete_project))
        .route("/projects/{id}/publish", post(handlers::publish_project))
        .route("/projects/{id}/reprice", post(handlers::reprice_project))
        .route("/projects/{id}/archive", post(handlers::archive_project))
        .route("/projects/{id}/pricing", get(handlers::project_pricing))
        .route("/projects/{id}/access", get(handlers::project_access))
        .route("/checkout", post(handlers::create_checkout))
        .route("/checkout/confirm", post(handlers::confirm_checkout))
        .route("/sellers/onboard", post(handlers::onboard_seller))
        .route("/sellers/{id}/refresh", post(handlers::refresh_seller))
        .route("/webhooks/processor", post(handlers::processor_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
