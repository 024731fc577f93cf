//! Shared application state, cloned into every handler via axum's `State`.

use std::sync::Arc;
use std::time::Duration;

use meetnote_core::validation::MediaValidator;
use meetnote_core::{AppError, Config, SessionStore};
use meetnote_provider::{ModelProvider, PollPolicy};
use meetnote_storage::ScratchStorage;

pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn ScratchStorage>,
    /// `None` when no provider credential is configured; the service still
    /// serves uploads and session management, but actions return 503.
    pub provider: Option<Arc<dyn ModelProvider>>,
    pub sessions: SessionStore,
    pub validator: MediaValidator,
    pub poll_policy: PollPolicy,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn ScratchStorage>,
        provider: Option<Arc<dyn ModelProvider>>,
    ) -> Self {
        let validator = MediaValidator::new(
            config.max_upload_size_bytes,
            config.allowed_extensions.clone(),
            config.allowed_content_types.clone(),
        );
        let poll_policy = PollPolicy::new(
            Duration::from_millis(config.poll_interval_ms),
            Duration::from_millis(config.poll_max_interval_ms),
            config.poll_max_attempts,
        );
        let sessions = SessionStore::new(config.chat_history_cap);

        Self {
            config,
            storage,
            provider,
            sessions,
            validator,
            poll_policy,
        }
    }

    pub fn provider(&self) -> Result<Arc<dyn ModelProvider>, AppError> {
        self.provider.clone().ok_or_else(|| {
            AppError::ModelUnavailable("no model provider credential is configured".to_string())
        })
    }
}
