//! Image attachment guard for product uploads.
//!
//! Runs before any upload is attempted; a rejected file never reaches the
//! network.

use super::rules::{FieldViolation, RuleType, FIELD_IMAGE, MSG_IMAGE_SIZE, MSG_IMAGE_TYPE};

/// MIME types accepted for product images.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum image size in bytes (5 MiB).
pub const MAX_IMAGE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

pub fn is_allowed_image_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_IMAGE_TYPES.contains(&essence.as_str())
}

/// Check an attachment's declared type and size. Type is checked first.
pub fn validate_image(content_type: &str, size_bytes: u64) -> Result<(), FieldViolation> {
    if !is_allowed_image_type(content_type) {
        return Err(FieldViolation::new(
            FIELD_IMAGE,
            RuleType::ImageType,
            MSG_IMAGE_TYPE,
        ));
    }
    if size_bytes > MAX_IMAGE_SIZE_BYTES {
        return Err(FieldViolation::new(
            FIELD_IMAGE,
            RuleType::ImageSize,
            MSG_IMAGE_SIZE,
        ));
    }
    Ok(())
}
