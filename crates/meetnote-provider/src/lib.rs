//! Hosted model provider integration.
//!
//! Exposes the provider as an opaque capability: upload media, check asset
//! state, generate text. The [`gemini`] module implements it against the
//! Google Generative Language API; [`poll`] turns the raw state check into a
//! bounded readiness wait.

pub mod gemini;
pub mod poll;
mod traits;

pub use gemini::GeminiClient;
pub use poll::{wait_until_ready, PollOutcome, PollPolicy};
pub use traits::{ModelProvider, ProviderError, ProviderResult};
