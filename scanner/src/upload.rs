use std::path::Path;

use crate::error::{ScanError, ValidationError};
use crate::validation::{self, Validation};

/// A user-picked image: raw bytes plus the media type the picker declared.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validation(&self) -> Validation {
        validation::validate_file(&self.media_type, self.size())
    }

    pub fn check(&self) -> Result<(), ValidationError> {
        validation::check_file(&self.media_type, self.size())
    }

    /// Reads a file from disk, guessing the media type from its extension.
    /// The type and size are checked from metadata first, so a rejected file
    /// is never read into memory.
    pub async fn from_path(path: &Path) -> Result<Self, ScanError> {
        let media_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let size = tokio::fs::metadata(path).await?.len();
        validation::check_file(&media_type, size)?;

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        log::debug!("Loaded {} ({}, {} bytes)", file_name, media_type, bytes.len());
        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }
}
