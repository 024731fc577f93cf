//! Core types for the meetnote service: configuration, error taxonomy,
//! domain models, prompt templates, session state, and upload validation.

pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod session;
pub mod validation;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use session::{ChatLog, SessionContext, SessionStore};
