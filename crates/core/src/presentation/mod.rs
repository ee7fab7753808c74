//! Display formatting: resource URLs and the read-side view models.

pub mod urls;
pub mod views;

pub use urls::{
    build_asset_url, qr_download_filename, AssetUrls, DEFAULT_API_ORIGIN, PLACEHOLDER_IMAGE,
};
pub use views::{BatchCardView, ProductCardView, VerificationView};
