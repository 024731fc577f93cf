//! Storage key construction.

use std::path::Path;
use uuid::Uuid;

/// Generate a fresh key for an uploaded recording, preserving the original
/// file extension (lowercased) so provider uploads keep a sensible name.
pub fn media_key(session_id: Uuid, filename: &str) -> String {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());
    format!("media/{}/{}.{}", session_id, Uuid::new_v4(), extension)
}

/// Fixed-name key for a generated document. Writing to it overwrites the
/// prior export of the same action.
pub fn document_key(session_id: Uuid, file_name: &str) -> String {
    format!("documents/{}/{}", session_id, file_name)
}

/// Prefixes owned by a session, used for cleanup on session removal.
pub fn session_prefixes(session_id: Uuid) -> [String; 2] {
    [
        format!("media/{}", session_id),
        format!("documents/{}", session_id),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_key_preserves_extension() {
        let sid = Uuid::new_v4();
        let key = media_key(sid, "Standup.MP3");
        assert!(key.starts_with(&format!("media/{}/", sid)));
        assert!(key.ends_with(".mp3"));
    }

    #[test]
    fn test_media_key_unique_per_call() {
        let sid = Uuid::new_v4();
        assert_ne!(media_key(sid, "a.wav"), media_key(sid, "a.wav"));
    }

    #[test]
    fn test_document_key_is_fixed() {
        let sid = Uuid::new_v4();
        assert_eq!(
            document_key(sid, "meeting_minutes.docx"),
            format!("documents/{}/meeting_minutes.docx", sid)
        );
        assert_eq!(
            document_key(sid, "meeting_minutes.docx"),
            document_key(sid, "meeting_minutes.docx")
        );
    }
}
