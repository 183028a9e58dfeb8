//! CFR: a self-describing tag-length-value tree of firmware setup options.
//!
//! - [`model`] is the declarative option tree a caller builds.
//! - [`encoder`] serializes that tree into one contiguous, checksummed blob.
//! - [`decoder`] validates a blob and drives a [`decoder::Visitor`] over it.
//!   No tree is materialized on decode.
//! - [`format`] holds the wire vocabulary shared by both directions.

pub mod checksum;
pub mod decoder;
pub mod encoder;
mod error;
pub mod format;
pub mod io_utils;
pub mod model;

pub use error::*;
