//! Typed client for the external catalog service.
//!
//! [`CatalogApi`] covers the administrative CRUD endpoints and the public
//! verification lookup. Every create/update runs the core validators first
//! and never sends a payload they reject. [`Verifier`] turns a lookup into
//! the verification view.

pub mod api;
pub mod config;
pub mod error;
pub mod upload;
pub mod verify;

pub use api::CatalogApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use upload::ImageUpload;
pub use verify::Verifier;
