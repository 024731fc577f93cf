//! Meetnote API library
//!
//! HTTP surface for the meeting summarizer: session lifecycle, media upload,
//! the four document actions, chat, and document download.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::ErrorResponse;
pub use state::AppState;
