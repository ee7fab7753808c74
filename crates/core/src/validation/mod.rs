//! Record validation engine.
//!
//! Field-level rules for product and batch payloads plus the image
//! attachment guard. Pure logic: every function returns either the
//! accepted, normalized payload or a keyed set of field violations.

pub mod batch;
pub mod image;
pub mod product;
pub mod rules;

pub use batch::validate_batch;
pub use image::validate_image;
pub use product::validate_product;
pub use rules::{FieldViolation, RuleType, ValidationErrors};
