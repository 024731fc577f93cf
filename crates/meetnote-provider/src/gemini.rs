//! Gemini (Google Generative Language API) provider client.
//!
//! Uses the Files API for media upload and status checks, and
//! `generateContent` for prompt dispatch. The base URL is injectable so tests
//! can point the client at a mock server.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::traits::{ModelProvider, ProviderError, ProviderResult};
use async_trait::async_trait;
use meetnote_core::models::{AssetHandle, AssetState};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini provider implementation
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: Client,
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> ProviderResult<Self> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
    ) -> ProviderResult<Self> {
        let http_client = Client::builder()
            // Long timeout: meeting recordings can be large and generation slow.
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| ProviderError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            http_client,
        })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/upload/v1beta/files?key={}",
            self.base_url, self.api_key
        )
    }

    fn file_url(&self, name: &str) -> String {
        format!("{}/v1beta/{}?key={}", self.base_url, name, self.api_key)
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    async fn check_status(response: reqwest::Response) -> ProviderResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn upload_media(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> ProviderResult<AssetHandle> {
        let size = data.len();

        let response = self
            .http_client
            .post(self.upload_url())
            .header("X-Goog-Upload-Protocol", "raw")
            .header("X-Goog-File-Name", filename)
            .header("Content-Type", content_type)
            .body(data)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let envelope: FileEnvelope = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("upload response: {}", e)))?;
        let info = envelope.file;

        tracing::info!(
            asset = %info.name,
            size_bytes = size,
            state = %info.state,
            "Media uploaded to provider"
        );

        Ok(AssetHandle {
            uri: info.uri.clone().unwrap_or_else(|| info.name.clone()),
            mime_type: info.mime_type.unwrap_or_else(|| content_type.to_string()),
            name: info.name,
        })
    }

    async fn asset_state(&self, handle: &AssetHandle) -> ProviderResult<AssetState> {
        let response = self
            .http_client
            .get(self.file_url(&handle.name))
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let info: FileInfo = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("file status response: {}", e)))?;

        Ok(info.into_state())
    }

    async fn generate(&self, prompt: &str, asset: &AssetHandle) -> ProviderResult<String> {
        let request_body = json!({
            "contents": [{
                "parts": [
                    { "text": prompt },
                    { "file_data": { "mime_type": asset.mime_type, "file_uri": asset.uri } }
                ]
            }]
        });

        let response = self
            .http_client
            .post(self.generate_url())
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("generate response: {}", e)))?;

        let text = parsed.text();
        if text.is_empty() {
            return Err(ProviderError::Decode(
                "generate response contained no text content".to_string(),
            ));
        }

        tracing::info!(
            asset = %asset.name,
            response_chars = text.len(),
            "Model generation completed"
        );

        Ok(text)
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct FileEnvelope {
    file: FileInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileInfo {
    name: String,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    state: String,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    error: Option<StatusDetail>,
}

#[derive(Debug, Deserialize)]
struct StatusDetail {
    #[serde(default)]
    message: Option<String>,
}

impl FileInfo {
    fn into_state(self) -> AssetState {
        match self.state.as_str() {
            "ACTIVE" => AssetState::Ready,
            "FAILED" => AssetState::Failed {
                reason: self.error.and_then(|e| e.message),
            },
            // "PROCESSING", "STATE_UNSPECIFIED", or anything unrecognized:
            // keep polling until the provider says otherwise.
            _ => AssetState::Processing,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(base_url: String) -> GeminiClient {
        GeminiClient::with_base_url(
            "test-api-key".to_string(),
            "gemini-2.0-flash-exp".to_string(),
            base_url,
        )
        .unwrap()
    }

    fn handle() -> AssetHandle {
        AssetHandle {
            name: "files/abc-123".to_string(),
            uri: "https://example.invalid/v1beta/files/abc-123".to_string(),
            mime_type: "audio/mpeg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_media_returns_processing_handle() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload/v1beta/files")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"file":{"name":"files/abc-123","uri":"https://example.invalid/v1beta/files/abc-123","state":"PROCESSING","mimeType":"audio/mpeg"}}"#,
            )
            .create_async()
            .await;

        let client = client(server.url());
        let asset = client
            .upload_media("standup.mp3", "audio/mpeg", b"bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(asset.name, "files/abc-123");
        assert_eq!(asset.mime_type, "audio/mpeg");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_asset_state_maps_active_to_ready() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1beta/files/abc-123")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"name":"files/abc-123","state":"ACTIVE"}"#)
            .create_async()
            .await;

        let client = client(server.url());
        let state = client.asset_state(&handle()).await.unwrap();
        assert_eq!(state, AssetState::Ready);
    }

    #[tokio::test]
    async fn test_asset_state_maps_failed_with_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1beta/files/abc-123")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"name":"files/abc-123","state":"FAILED","error":{"message":"unsupported codec"}}"#,
            )
            .create_async()
            .await;

        let client = client(server.url());
        let state = client.asset_state(&handle()).await.unwrap();
        assert_eq!(
            state,
            AssetState::Failed {
                reason: Some("unsupported codec".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_generate_extracts_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            )
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r###"{"candidates":[{"content":{"parts":[{"text":"## Minutes\n"},{"text":"- decided X"}]}}]}"###,
            )
            .create_async()
            .await;

        let client = client(server.url());
        let text = client.generate("make minutes", &handle()).await.unwrap();
        assert_eq!(text, "## Minutes\n- decided X");
    }

    #[tokio::test]
    async fn test_api_error_surfaces_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            )
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let client = client(server.url());
        let err = client.generate("make minutes", &handle()).await.unwrap_err();
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 429);
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_without_text_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            )
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = client(server.url());
        let err = client.generate("make minutes", &handle()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
