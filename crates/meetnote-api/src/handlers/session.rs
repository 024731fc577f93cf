//! Session lifecycle: explicit create and delete.
//!
//! Deleting a session drops its in-memory state and removes every scratch
//! file it owns (the uploaded recording and any generated documents).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/v0/sessions",
    tag = "sessions",
    responses(
        (status = 201, description = "Session created", body = SessionResponse)
    )
)]
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionResponse>) {
    let id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionResponse { id }))
}

#[utoipa::path(
    delete,
    path = "/api/v0/sessions/{session_id}",
    tag = "sessions",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Session and its scratch files removed"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    state.sessions.remove(session_id).await?;
    state.storage.delete_session(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
