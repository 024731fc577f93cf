//! The action pipeline: retrieve the session's recording from scratch
//! storage, push it to the provider, wait for the remote asset to become
//! ready, then run one prompt against it.
//!
//! Each action re-uploads the recording; the provider-side asset is treated
//! as transient and never cached across actions.

use uuid::Uuid;

use crate::error::storage_to_app_error;
use crate::state::AppState;
use meetnote_core::models::{AssetHandle, ChatTurn, UploadedMedia};
use meetnote_core::prompts::{chat_prompt, ActionKind};
use meetnote_core::AppError;
use meetnote_provider::{wait_until_ready, PollOutcome};
use meetnote_storage::keys;

pub struct ActionOutcome {
    /// Raw model response text, shown to the client as-is.
    pub content: String,
    /// Scratch key of the generated document, overwritten on each run.
    pub document_key: String,
}

/// Upload the recording to the provider and wait until the asset is usable.
///
/// A provider-reported failure aborts here, before any prompt is dispatched.
async fn prepare_ready_asset(
    state: &AppState,
    media: &UploadedMedia,
) -> Result<AssetHandle, AppError> {
    let provider = state.provider()?;

    let data = state
        .storage
        .retrieve(&media.storage_key)
        .await
        .map_err(storage_to_app_error)?;

    let handle = provider
        .upload_media(&media.original_filename, &media.content_type, data)
        .await?;

    match wait_until_ready(provider.as_ref(), &handle, &state.poll_policy).await? {
        PollOutcome::Ready(handle) => Ok(handle),
        PollOutcome::Failed { reason } => Err(AppError::AssetFailed(reason)),
        PollOutcome::TimedOut { attempts } => Err(AppError::Timeout(format!(
            "remote asset still processing after {} status checks",
            attempts
        ))),
    }
}

async fn current_media(state: &AppState, session_id: Uuid) -> Result<UploadedMedia, AppError> {
    state
        .sessions
        .current_media(session_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("no meeting recording uploaded for this session".to_string())
        })
}

/// Run one document action end to end and persist the exported `.docx` under
/// the session's scratch prefix, replacing any earlier export of the same kind.
pub async fn run_action(
    state: &AppState,
    session_id: Uuid,
    kind: ActionKind,
) -> Result<ActionOutcome, AppError> {
    let media = current_media(state, session_id).await?;
    tracing::info!(
        session_id = %session_id,
        action = %kind,
        file = %media.original_filename,
        "Running meeting action"
    );

    let asset = prepare_ready_asset(state, &media).await?;
    let content = state.provider()?.generate(kind.template(), &asset).await?;

    let bytes = meetnote_docgen::render(kind.document_title(), &content)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let document_key = keys::document_key(session_id, kind.document_file_name());
    state
        .storage
        .store_at(&document_key, bytes)
        .await
        .map_err(storage_to_app_error)?;

    tracing::info!(
        session_id = %session_id,
        action = %kind,
        document_key = %document_key,
        content_chars = content.len(),
        "Meeting action complete"
    );

    Ok(ActionOutcome {
        content,
        document_key,
    })
}

/// Answer a free-form question about the recording and record the turn in the
/// session's chat history. A blank question is a no-op: no model call, no
/// history entry, `Ok(None)`.
pub async fn answer_question(
    state: &AppState,
    session_id: Uuid,
    question: &str,
) -> Result<Option<ChatTurn>, AppError> {
    if question.trim().is_empty() {
        tracing::debug!(session_id = %session_id, "Ignoring blank chat question");
        return Ok(None);
    }

    let media = current_media(state, session_id).await?;
    tracing::info!(
        session_id = %session_id,
        file = %media.original_filename,
        "Answering chat question"
    );

    let asset = prepare_ready_asset(state, &media).await?;
    let answer = state
        .provider()?
        .generate(&chat_prompt(question), &asset)
        .await?;

    let turn = state
        .sessions
        .append_chat(session_id, question.to_string(), answer)
        .await?;
    Ok(Some(turn))
}
