//! Recording upload: multipart `file` field, validated and written to
//! scratch storage. Each session holds at most one recording; a new upload
//! replaces the prior one and its scratch file is deleted in the background.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use meetnote_core::models::{MediaKind, UploadedMedia};
use meetnote_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaResponse {
    pub id: Uuid,
    pub original_filename: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl From<UploadedMedia> for MediaResponse {
    fn from(media: UploadedMedia) -> Self {
        Self {
            id: media.id,
            original_filename: media.original_filename,
            content_type: media.content_type,
            kind: media.kind,
            size_bytes: media.size_bytes,
            uploaded_at: media.uploaded_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v0/sessions/{session_id}/media",
    tag = "media",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Recording uploaded", body = MediaResponse),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_media"))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<MediaResponse>, HttpAppError> {
    if !state.sessions.exists(session_id).await {
        return Err(AppError::NotFound(format!("session {}", session_id)).into());
    }

    let mut upload: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidInput("multipart 'file' field has no filename".to_string()))?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidInput("multipart 'file' field has no content type".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
            .to_vec();
        upload = Some((filename, content_type, data));
        break;
    }

    let (filename, content_type, data) = upload.ok_or_else(|| {
        AppError::InvalidInput("multipart field 'file' is required".to_string())
    })?;

    state
        .validator
        .validate_upload(&filename, &content_type, data.len())?;
    let kind = MediaKind::from_content_type(&content_type).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "content type '{}' is neither audio nor video",
            content_type
        ))
    })?;

    let size_bytes = data.len();
    let storage_key = state
        .storage
        .store_media(session_id, &filename, data)
        .await?;

    let media = UploadedMedia {
        id: Uuid::new_v4(),
        original_filename: filename,
        content_type,
        kind,
        size_bytes,
        storage_key,
        uploaded_at: Utc::now(),
    };

    let prior = state.sessions.replace_media(session_id, media.clone()).await?;
    if let Some(prior) = prior {
        // Best-effort cleanup; the new recording is already in place.
        let storage = state.storage.clone();
        tokio::spawn(async move {
            if let Err(error) = storage.delete(&prior.storage_key).await {
                tracing::warn!(
                    storage_key = %prior.storage_key,
                    error = %error,
                    "Failed to delete replaced recording"
                );
            }
        });
    }

    tracing::info!(
        session_id = %session_id,
        file = %media.original_filename,
        size_bytes = media.size_bytes,
        kind = ?media.kind,
        "Recording uploaded"
    );

    Ok(Json(MediaResponse::from(media)))
}
