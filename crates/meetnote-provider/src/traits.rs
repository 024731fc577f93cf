use async_trait::async_trait;
use meetnote_core::models::{AssetHandle, AssetState};
use meetnote_core::AppError;
use thiserror::Error;

/// Provider operation errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Http(String),

    #[error("Provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::ModelError(err.to_string())
    }
}

/// The opaque capability the pipeline depends on:
/// `upload -> handle`, `state(handle)`, `generate(prompt, handle) -> text`.
///
/// Tests substitute deterministic stubs; production uses [`crate::GeminiClient`].
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Push raw media bytes to the provider's file storage. The returned
    /// handle starts in `Processing` state.
    async fn upload_media(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> ProviderResult<AssetHandle>;

    /// Re-fetch the current lifecycle state of an uploaded asset.
    async fn asset_state(&self, handle: &AssetHandle) -> ProviderResult<AssetState>;

    /// Invoke the model with an instruction plus one ready asset, returning
    /// the raw text content.
    async fn generate(&self, prompt: &str, asset: &AssetHandle) -> ProviderResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_maps_to_model_error() {
        let err: AppError = ProviderError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::ModelError(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
