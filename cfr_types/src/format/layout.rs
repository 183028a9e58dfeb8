use std::mem;

/// Every record starts at a multiple of this, and every `size` is one.
pub const ENTRY_ALIGN: usize = 4;

const FIELD_LEN: usize = mem::size_of::<u32>();

/// `tag` + `size`.
pub const HEADER_LEN: usize = 2 * FIELD_LEN;

/* Header plus fixed fields, per record kind. */
pub const ROOT_FIXED_LEN: usize = HEADER_LEN + FIELD_LEN; // checksum
pub const FORM_FIXED_LEN: usize = HEADER_LEN + 2 * FIELD_LEN; // object_id, flags
pub const NUMERIC_OPTION_FIXED_LEN: usize = HEADER_LEN + 3 * FIELD_LEN; // object_id, flags, default_value
pub const VARCHAR_OPTION_FIXED_LEN: usize = HEADER_LEN + 2 * FIELD_LEN; // object_id, flags
pub const COMMENT_FIXED_LEN: usize = HEADER_LEN + 2 * FIELD_LEN; // object_id, flags
pub const ENUM_VALUE_FIXED_LEN: usize = HEADER_LEN + FIELD_LEN; // value
pub const VARCHAR_FIXED_LEN: usize = HEADER_LEN + FIELD_LEN; // data_length

/// Offset of the checksum field from the start of the root record.
pub const ROOT_CHECKSUM_OFFSET: usize = HEADER_LEN;
/// Offset of the size field from the start of any record.
pub const SIZE_FIELD_OFFSET: usize = FIELD_LEN;

pub fn align_up(len: usize) -> usize {
    (len + (ENTRY_ALIGN - 1)) & !(ENTRY_ALIGN - 1)
}

pub fn is_aligned(offset: usize) -> bool {
    offset & (ENTRY_ALIGN - 1) == 0
}
