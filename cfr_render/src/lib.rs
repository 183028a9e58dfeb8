//! Presentation consumers of a decoded CFR blob.
//!
//! Each renderer is a [`cfr_types::decoder::Visitor`] writing into any [`std::io::Write`].
//! They see records only as the decoder validates them, so a render that fails
//! midway leaves partial output behind; buffer it if that matters.

mod c_array;
mod debug_printer;
mod html;

pub use c_array::*;
pub use debug_printer::*;
pub use html::*;
