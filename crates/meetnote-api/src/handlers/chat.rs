//! Per-session chat about the uploaded recording.
//!
//! Chat runs the same upload-and-wait pipeline as the document actions but
//! produces no document; answered turns accumulate in the session's history
//! in ask order. A blank question is silently ignored (204, no model call).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::pipeline;
use crate::state::AppState;
use meetnote_core::models::ChatTurn;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatHistoryResponse {
    pub turns: Vec<ChatTurn>,
}

#[utoipa::path(
    post,
    path = "/api/v0/sessions/{session_id}/chat",
    tag = "chat",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Question answered", body = ChatTurn),
        (status = 204, description = "Blank question ignored"),
        (status = 400, description = "No recording uploaded", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 502, description = "Provider rejected the recording or the model call failed", body = ErrorResponse),
        (status = 503, description = "Model calls disabled", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "ask_question"))]
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<Response, HttpAppError> {
    match pipeline::answer_question(&state, session_id, &request.question).await? {
        Some(turn) => Ok(Json(turn).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/sessions/{session_id}/chat",
    tag = "chat",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Chat history in ask order", body = ChatHistoryResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn chat_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ChatHistoryResponse>, HttpAppError> {
    let turns = state.sessions.chat_history(session_id).await?;
    Ok(Json(ChatHistoryResponse { turns }))
}
