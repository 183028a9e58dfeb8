//! # Wire format
//!
//! A CFR blob is a tree of records. Every record starts with the same header,
//! and every record start is aligned to [`ENTRY_ALIGN`] bytes. All fields are
//! little-endian `u32`.
//!
//! `size` covers the record's own fixed fields plus all of its children, plus
//! zero padding up to the alignment boundary. There are no child counts:
//! a parent's `size` bounds the scan over its children.
//!
//! The below pseudocode depicts the records, fixed fields first, then children
//! in the order they are written.
//!
//! ```text
//! struct Root {                   // Tag::Root, outermost only
//!     tag:            u32,
//!     size:           u32,
//!     checksum:       u32,        // CRC over the whole root with this field zeroed
//!     forms:          [Form],
//! }
//!
//! struct Form {                   // Tag::OptionForm
//!     tag, size, object_id, flags,
//!     ui_name:        Varchar<UiName>,
//!     options:        [Form | EnumOption | NumberOption | BoolOption
//!                      | VarcharOption | CommentOption],
//! }
//!
//! struct NumericOption {          // Tag::OptionEnum, OptionNumber, OptionBool
//!     tag, size, object_id, flags,
//!     default_value:  u32,        // 0 or 1 for OptionBool
//!     opt_name:       Varchar<OptName>,
//!     ui_name:        Varchar<UiName>,
//!     ui_helptext:    Varchar<UiHelptext>,    // optional
//!     enum_values:    [EnumValue],            // OptionEnum only
//! }
//!
//! struct VarcharOption {          // Tag::OptionVarchar
//!     tag, size, object_id, flags,
//!     default_value:  Varchar<DefValue>,
//!     opt_name:       Varchar<OptName>,
//!     ui_name:        Varchar<UiName>,
//!     ui_helptext:    Varchar<UiHelptext>,    // optional
//! }
//!
//! struct CommentOption {          // Tag::OptionComment
//!     tag, size, object_id, flags,
//!     ui_name:        Varchar<UiName>,
//!     ui_helptext:    Varchar<UiHelptext>,    // optional
//! }
//!
//! struct EnumValue {              // Tag::EnumValue
//!     tag, size,
//!     value:          u32,
//!     ui_name:        Varchar<UiName>,
//! }
//!
//! struct Varchar<T> {             // Tag::Varchar*
//!     tag, size,
//!     data_length:    u32,        // payload bytes, including the NUL terminator
//!     data:           [u8; data_length],
//! }
//! ```

mod flags;
mod layout;
mod tag;

pub use flags::*;
pub use layout::*;
pub use tag::*;
