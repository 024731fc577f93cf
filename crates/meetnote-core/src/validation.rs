//! Upload validation for meeting recordings.
//!
//! Checks size, extension, and declared content type against the configured
//! allowlists before any bytes reach scratch storage. Nothing here inspects
//! codecs or containers; the declared type is trusted.

use std::path::Path;

/// Common validation errors for uploaded recordings
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

/// Recording validator
///
/// Provides validation logic for uploads without coupling to storage
/// implementation details.
#[derive(Clone, Debug)]
pub struct MediaValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl MediaValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
        }
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate that the declared Content-Type matches the file extension.
    /// Prevents spoofed uploads where a disallowed payload carries an
    /// allowed-looking Content-Type.
    pub fn validate_extension_content_type_match(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;

        let normalized_content_type = content_type.to_lowercase();

        let expected_content_types: Vec<&str> = match extension.as_str() {
            "mp4" => vec!["video/mp4"],
            "mov" => vec!["video/quicktime"],
            "avi" => vec!["video/x-msvideo"],
            "mp3" => vec!["audio/mpeg", "audio/mp3"],
            "wav" => vec!["audio/wav", "audio/wave", "audio/x-wav"],
            // Unknown extensions were already rejected by validate_extension.
            _ => return Ok(()),
        };

        if !expected_content_types.contains(&normalized_content_type.as_str()) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: expected_content_types
                    .into_iter()
                    .map(String::from)
                    .collect(),
            });
        }

        Ok(())
    }

    /// Run the full set of upload checks in one call.
    pub fn validate_upload(
        &self,
        filename: &str,
        content_type: &str,
        size: usize,
    ) -> Result<(), ValidationError> {
        self.validate_file_size(size)?;
        self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        self.validate_extension_content_type_match(filename, content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> MediaValidator {
        MediaValidator::new(
            10 * 1024 * 1024,
            ["mp4", "mov", "avi", "mp3", "wav"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
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
            .collect(),
        )
    }

    #[test]
    fn test_valid_upload_passes() {
        let v = validator();
        assert!(v.validate_upload("standup.mp3", "audio/mpeg", 1024).is_ok());
        assert!(v.validate_upload("allhands.MP4", "video/mp4", 1024).is_ok());
    }

    #[test]
    fn test_empty_file_rejected() {
        let v = validator();
        assert!(matches!(
            v.validate_upload("standup.mp3", "audio/mpeg", 0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_oversize_rejected() {
        let v = validator();
        assert!(matches!(
            v.validate_file_size(11 * 1024 * 1024),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let v = validator();
        assert!(matches!(
            v.validate_extension("notes.pdf"),
            Err(ValidationError::InvalidExtension { .. })
        ));
        assert!(matches!(
            v.validate_extension("no_extension"),
            Err(ValidationError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_content_type_must_match_extension() {
        let v = validator();
        assert!(matches!(
            v.validate_extension_content_type_match("standup.mp3", "video/mp4"),
            Err(ValidationError::InvalidContentType { .. })
        ));
        assert!(v
            .validate_extension_content_type_match("standup.wav", "audio/x-wav")
            .is_ok());
    }
}
