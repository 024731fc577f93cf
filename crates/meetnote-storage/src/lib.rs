//! Scratch storage for the meetnote service.
//!
//! Holds session-lifetime files only: uploaded meeting recordings and the
//! generated documents derived from them. Keys are session-scoped
//! (`media/{session_id}/...`, `documents/{session_id}/...`) so removing a
//! session can delete everything it owned in one sweep.

pub mod keys;
mod local;
mod traits;

pub use local::LocalScratchStorage;
pub use traits::{ScratchStorage, StorageError, StorageResult};
