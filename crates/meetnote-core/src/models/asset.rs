use serde::{Deserialize, Serialize};

/// Opaque handle to a file held by the model provider.
///
/// Every triggered action re-uploads the session recording as a brand-new
/// asset; handles are never cached across actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetHandle {
    /// Provider-assigned resource name (e.g. "files/abc-123").
    pub name: String,
    /// URI referenced in generation requests.
    pub uri: String,
    pub mime_type: String,
}

/// Remote asset lifecycle as reported by the provider.
///
/// An asset must reach `Ready` before it may be passed to the prompt
/// dispatcher; `Failed` aborts the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetState {
    Processing,
    Ready,
    Failed { reason: Option<String> },
}

impl AssetState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AssetState::Processing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!AssetState::Processing.is_terminal());
        assert!(AssetState::Ready.is_terminal());
        assert!(AssetState::Failed { reason: None }.is_terminal());
    }
}
