//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const API_PREFIX: &str = "/api/v0";

// Multipart framing adds headers and boundaries on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the full application router with all middleware applied.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state);
    let body_limit = state.config.max_upload_size_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api-docs/openapi.json", get(crate::api_doc::serve_openapi))
        .route(
            &format!("{}/sessions", API_PREFIX),
            post(handlers::session::create_session),
        )
        .route(
            &format!("{}/sessions/{{session_id}}", API_PREFIX),
            delete(handlers::session::delete_session),
        )
        .route(
            &format!("{}/sessions/{{session_id}}/media", API_PREFIX),
            post(handlers::media::upload_media),
        )
        .route(
            &format!("{}/sessions/{{session_id}}/actions/{{action}}", API_PREFIX),
            post(handlers::actions::run_action),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/documents/{{action}}",
                API_PREFIX
            ),
            get(handlers::actions::download_document),
        )
        .route(
            &format!("{}/sessions/{{session_id}}/chat", API_PREFIX),
            post(handlers::chat::ask_question).get(handlers::chat::chat_history),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
}

/// Setup CORS configuration
fn cors_layer(state: &Arc<AppState>) -> CorsLayer {
    let origins = &state.config.cors_origins;
    if origins.contains(&"*".to_string()) {
        if state.config.is_production() {
            tracing::warn!("CORS configured to allow all origins in production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    }
}
