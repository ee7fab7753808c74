//! Canonical URLs for stored images.
//!
//! Product images and verification QR codes are stored as relative paths
//! (or absolute URLs from a third-party store). Both go through
//! [`build_asset_url`], so every caller handles the absent case the same way.

use crate::batch::ProductBatch;
use crate::product::Product;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Backend origin used when none is configured.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8081";

/// Stable reference returned for an absent image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

// ---------------------------------------------------------------------------
// URL building
// ---------------------------------------------------------------------------

fn has_http_scheme(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Build a fetchable URL from a base origin and a possibly-relative path.
///
/// - absent or blank path: [`PLACEHOLDER_IMAGE`]
/// - `http://` / `https://` path: returned unchanged
/// - otherwise: base and path joined by exactly one `/`
pub fn build_asset_url(base: &str, path: Option<&str>) -> String {
    let path = match path.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return PLACEHOLDER_IMAGE.to_string(),
    };
    if has_http_scheme(path) {
        return path.to_string();
    }
    let base = base.trim().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// File name offered when downloading a batch's QR code.
pub fn qr_download_filename(batch_id: &str) -> String {
    format!("qr-{batch_id}.png")
}

// ---------------------------------------------------------------------------
// AssetUrls
// ---------------------------------------------------------------------------

/// The configured backend origin, bound to the URL builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    base: String,
}

impl AssetUrls {
    pub fn new(base: &str) -> Self {
        Self::from_origin(Some(base))
    }

    /// Use the configured origin, or [`DEFAULT_API_ORIGIN`] when it is
    /// absent or blank.
    pub fn from_origin(origin: Option<&str>) -> Self {
        let base = origin
            .map(|o| o.trim().trim_end_matches('/'))
            .filter(|o| !o.is_empty())
            .unwrap_or(DEFAULT_API_ORIGIN);
        Self {
            base: base.to_string(),
        }
    }

    /// The origin, without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn resolve(&self, path: Option<&str>) -> String {
        build_asset_url(&self.base, path)
    }

    pub fn product_image(&self, product: &Product) -> String {
        self.resolve(product.image.as_deref())
    }

    pub fn qr_code(&self, batch: &ProductBatch) -> String {
        self.resolve(batch.qr_code_url.as_deref())
    }
}

impl Default for AssetUrls {
    fn default() -> Self {
        Self::from_origin(None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
