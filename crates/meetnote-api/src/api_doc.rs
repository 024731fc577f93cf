//! OpenAPI documentation, served at `/api-docs/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::session::create_session,
        crate::handlers::session::delete_session,
        crate::handlers::media::upload_media,
        crate::handlers::actions::run_action,
        crate::handlers::actions::download_document,
        crate::handlers::chat::ask_question,
        crate::handlers::chat::chat_history,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::handlers::health::HealthResponse,
        crate::handlers::session::SessionResponse,
        crate::handlers::media::MediaResponse,
        crate::handlers::actions::ActionResponse,
        crate::handlers::chat::ChatRequest,
        crate::handlers::chat::ChatHistoryResponse,
        meetnote_core::models::ChatTurn,
        meetnote_core::models::MediaKind,
        meetnote_core::prompts::ActionKind,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "sessions", description = "Session lifecycle"),
        (name = "media", description = "Meeting recording upload"),
        (name = "actions", description = "Document-producing meeting transformations"),
        (name = "chat", description = "Q&A about the uploaded recording")
    ),
    info(
        title = "Meetnote API",
        description = "Meeting summarizer: upload a recording, generate minutes, summaries, action items and insights, ask questions, export documents."
    )
)]
pub struct ApiDoc;

pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
