//! The declarative option tree fed to the encoder.
//!
//! Which options exist, and their labels and defaults, is up to the caller.
//! Value lists have explicit lengths; nothing here marks the end of a list.

mod object_id;
mod options;

pub use object_id::*;
pub use options::*;
