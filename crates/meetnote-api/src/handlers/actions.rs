//! The four document actions and the document download endpoint.
//!
//! Running an action returns the model text immediately and also writes the
//! exported `.docx` to scratch storage under a fixed per-action name, so the
//! download endpoint always serves the latest run.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::pipeline;
use crate::state::AppState;
use meetnote_core::prompts::ActionKind;
use meetnote_core::AppError;
use meetnote_docgen::DOCX_CONTENT_TYPE;
use meetnote_storage::{keys, StorageError};

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub action: ActionKind,
    /// Raw model response text, unmodified.
    pub content: String,
    /// File name the exported document downloads as.
    pub document_file_name: String,
}

fn parse_action(action: &str) -> Result<ActionKind, HttpAppError> {
    action
        .parse::<ActionKind>()
        .map_err(|e| AppError::InvalidInput(e.to_string()).into())
}

#[utoipa::path(
    post,
    path = "/api/v0/sessions/{session_id}/actions/{action}",
    tag = "actions",
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
        ("action" = String, Path, description = "One of: minutes, summary, action_items, insights")
    ),
    responses(
        (status = 200, description = "Action completed", body = ActionResponse),
        (status = 400, description = "Unknown action or no recording uploaded", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 502, description = "Provider rejected the recording or the model call failed", body = ErrorResponse),
        (status = 503, description = "Model calls disabled", body = ErrorResponse),
        (status = 504, description = "Remote asset never became ready", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "run_action"))]
pub async fn run_action(
    State(state): State<Arc<AppState>>,
    Path((session_id, action)): Path<(Uuid, String)>,
) -> Result<Json<ActionResponse>, HttpAppError> {
    let kind = parse_action(&action)?;
    let outcome = pipeline::run_action(&state, session_id, kind).await?;

    Ok(Json(ActionResponse {
        action: kind,
        content: outcome.content,
        document_file_name: kind.document_file_name().to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v0/sessions/{session_id}/documents/{action}",
    tag = "actions",
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
        ("action" = String, Path, description = "One of: minutes, summary, action_items, insights")
    ),
    responses(
        (status = 200, description = "The exported .docx from the most recent run of this action"),
        (status = 400, description = "Unknown action", body = ErrorResponse),
        (status = 404, description = "No document generated yet", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_document"))]
pub async fn download_document(
    State(state): State<Arc<AppState>>,
    Path((session_id, action)): Path<(Uuid, String)>,
) -> Result<Response, HttpAppError> {
    let kind = parse_action(&action)?;
    if !state.sessions.exists(session_id).await {
        return Err(AppError::NotFound(format!("session {}", session_id)).into());
    }

    let document_key = keys::document_key(session_id, kind.document_file_name());
    let data = match state.storage.retrieve(&document_key).await {
        Ok(data) => data,
        Err(StorageError::NotFound(_)) => {
            return Err(AppError::NotFound(format!(
                "no generated document for action '{}'; run the action first",
                kind
            ))
            .into());
        }
        Err(other) => return Err(other.into()),
    };

    let disposition = format!("attachment; filename=\"{}\"", kind.document_file_name());
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}
