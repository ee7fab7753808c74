//! Batch lifecycle and validation rules for the product catalog.
//!
//! Everything in this crate is pure: no I/O, no global clock reads except
//! [`batch_status::today`], which callers use at the boundary to obtain the
//! "current date" that every other function takes as an explicit argument.

pub mod batch;
pub mod batch_status;
pub mod dates;
pub mod error;
pub mod presentation;
pub mod product;
pub mod types;
pub mod validation;
