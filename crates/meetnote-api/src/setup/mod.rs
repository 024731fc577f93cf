//! Application setup and initialization
//!
//! All initialization logic lives here instead of main.rs so tests can build
//! the same router with substituted storage and provider implementations.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::Result;
use meetnote_core::Config;
use meetnote_provider::{GeminiClient, ModelProvider};
use meetnote_storage::{LocalScratchStorage, ScratchStorage};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let storage: Arc<dyn ScratchStorage> =
        Arc::new(LocalScratchStorage::new(config.scratch_dir.clone()).await?);
    tracing::info!(scratch_dir = %config.scratch_dir.display(), "Scratch storage ready");

    let provider: Option<Arc<dyn ModelProvider>> = match &config.google_api_key {
        Some(api_key) => {
            let client = GeminiClient::with_base_url(
                api_key.clone(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
            )?;
            tracing::info!(model = %config.gemini_model, "Model provider configured");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!(
                "GOOGLE_API_KEY not set; uploads and sessions work but actions return 503"
            );
            None
        }
    };

    let state = Arc::new(AppState::new(config, storage, provider));
    let router = routes::build_router(state.clone());

    Ok((state, router))
}
