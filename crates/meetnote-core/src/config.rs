//! Configuration module
//!
//! All configuration is read from environment variables (with `.env` support
//! via dotenvy) at startup. Every knob has a default so the service starts
//! with nothing but an optional `GOOGLE_API_KEY`; absence of the key disables
//! model calls but does not prevent startup.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 512;
// The original pipeline polled once per second with no upper bound; the
// bounded default below keeps the same cadence but gives up after ten
// minutes of growing backoff.
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
const DEFAULT_POLL_MAX_INTERVAL_MS: u64 = 5_000;
const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 120;
const DEFAULT_CHAT_HISTORY_CAP: usize = 256;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Credential for the hosted model provider. `None` disables model calls.
    pub google_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// Root directory for scratch storage (uploads and generated documents).
    pub scratch_dir: PathBuf,
    pub max_upload_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    pub poll_interval_ms: u64,
    pub poll_max_interval_ms: u64,
    pub poll_max_attempts: u32,
    pub chat_history_cap: usize,
}

fn default_allowed_extensions() -> Vec<String> {
    ["mp4", "mov", "avi", "mp3", "wav"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_allowed_content_types() -> Vec<String> {
    [
        "video/mp4",
        "video/quicktime",
        "video/x-msvideo",
        "audio/mpeg",
        "audio/mp3",
        "audio/wav",
        "audio/wave",
        "audio/x-wav",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn parse_csv(value: String) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = parse_csv(env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()?;

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .map(parse_csv)
            .unwrap_or_else(|_| default_allowed_extensions());

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .map(parse_csv)
            .unwrap_or_else(|_| default_allowed_content_types());

        let scratch_dir = env::var("SCRATCH_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("meetnote"));

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()?,
            cors_origins,
            environment,
            google_api_key: env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            scratch_dir,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            allowed_extensions,
            allowed_content_types,
            poll_interval_ms: env::var("POLL_INTERVAL_MS")
                .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_MS.to_string())
                .parse()?,
            poll_max_interval_ms: env::var("POLL_MAX_INTERVAL_MS")
                .unwrap_or_else(|_| DEFAULT_POLL_MAX_INTERVAL_MS.to_string())
                .parse()?,
            poll_max_attempts: env::var("POLL_MAX_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_POLL_MAX_ATTEMPTS.to_string())
                .parse()?,
            chat_history_cap: env::var("CHAT_HISTORY_CAP")
                .unwrap_or_else(|_| DEFAULT_CHAT_HISTORY_CAP.to_string())
                .parse()?,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }

    pub fn model_calls_enabled(&self) -> bool {
        self.google_api_key.is_some()
    }

    /// Defaults without touching the process environment. Used by tests and
    /// as the base for programmatic construction.
    pub fn for_tests(scratch_dir: PathBuf) -> Self {
        Config {
            server_port: DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            google_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            scratch_dir,
            max_upload_size_bytes: DEFAULT_MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            allowed_extensions: default_allowed_extensions(),
            allowed_content_types: default_allowed_content_types(),
            poll_interval_ms: 1,
            poll_max_interval_ms: 5,
            poll_max_attempts: 10,
            chat_history_cap: DEFAULT_CHAT_HISTORY_CAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions_match_upload_surface() {
        let exts = default_allowed_extensions();
        for ext in ["mp4", "mov", "avi", "mp3", "wav"] {
            assert!(exts.contains(&ext.to_string()));
        }
        assert_eq!(exts.len(), 5);
    }

    #[test]
    fn test_parse_csv_trims_and_lowercases() {
        let parsed = parse_csv(" MP4, mov ,,wav ".to_string());
        assert_eq!(parsed, vec!["mp4", "mov", "wav"]);
    }

    #[test]
    fn test_for_tests_has_no_credential() {
        let config = Config::for_tests(PathBuf::from("/tmp/meetnote-test"));
        assert!(!config.model_calls_enabled());
        assert!(!config.is_production());
    }
}
