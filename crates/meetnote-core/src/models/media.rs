use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of uploaded meeting recording, decided from the declared content type.
///
/// Only used to pick the preview treatment client-side; no codec or container
/// inspection happens beyond trusting the declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let ct = content_type.to_ascii_lowercase();
        if ct.starts_with("audio/") {
            Some(MediaKind::Audio)
        } else if ct.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// A meeting recording uploaded into a session and written to scratch storage.
///
/// Lifetime is the session: uploading a new file replaces the prior one, and
/// removing the session deletes the scratch file.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedMedia {
    pub id: Uuid,
    pub original_filename: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub size_bytes: usize,
    /// Storage key of the scratch file holding the raw bytes.
    pub storage_key: String,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_content_type() {
        assert_eq!(
            MediaKind::from_content_type("audio/mpeg"),
            Some(MediaKind::Audio)
        );
        assert_eq!(
            MediaKind::from_content_type("Video/MP4"),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaKind::from_content_type("application/pdf"), None);
    }
}
