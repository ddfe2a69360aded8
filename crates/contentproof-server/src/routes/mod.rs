//! API routes for the ContentProof server.

pub mod content;
pub mod health;
pub mod ledger;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Slack on top of the base64-encoded content for the rest of the JSON body.
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Creates the main router: `/health` plus the v1 API.
pub fn create_router(state: AppState) -> Router {
    let body_limit = request_body_limit(state.max_upload_bytes);
    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api_v1_routes(state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Creates the v1 API routes.
fn api_v1_routes(state: AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state.clone()))
        .nest("/content", content::router(state.clone()))
        .nest("/ledger", ledger::router(state))
}

/// Largest request body that can carry `max_upload_bytes` of base64 content.
fn request_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(BODY_OVERHEAD_BYTES)
}
