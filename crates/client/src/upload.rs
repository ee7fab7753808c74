//! Product image attachments.

use maquila_core::validation::{validate_image, FieldViolation};

/// MIME type used when the bytes are not a recognizable image.
pub const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// An image file to attach to a product create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Build an upload whose MIME type comes from the file's magic bytes
    /// rather than its name.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content_type = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(UNKNOWN_CONTENT_TYPE);
        Self::new(file_name, content_type, bytes)
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Run the attachment guard on this file.
    pub fn validate(&self) -> Result<(), FieldViolation> {
        validate_image(&self.content_type, self.size_bytes())
    }

    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part, reqwest::Error> {
        reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
    }
}
