use crate::format::TagInt;
use thiserror::Error;

/// A structural violation of the CFR wire format.
///
/// All of these are fatal: decoding stops at the first one, since continuing
/// would mean interpreting bytes at an offset that can no longer be trusted.
/// They travel inside [`anyhow::Error`]; use `downcast_ref::<CfrError>()` to match on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CfrError {
    #[error("address {offset:#x} is not 4-byte aligned, bailing")]
    Misaligned { offset: usize },

    #[error("record at {offset:#x} needs {needed} bytes but only {available} remain")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("expected a {expected} but got a {actual} instead at {offset:#x}, bailing")]
    TagMismatch {
        expected: TagInt,
        actual: TagInt,
        offset: usize,
    },

    #[error("could not find required {expected} at {offset:#x}")]
    MissingRecord { expected: TagInt, offset: usize },

    #[error("a {actual} may not appear in {section} (at {offset:#x})")]
    UnexpectedRecord {
        actual: TagInt,
        section: &'static str,
        offset: usize,
    },

    #[error("{tag} at {offset:#x} declares {declared} bytes but its contents span {consumed}")]
    SizeMismatch {
        tag: TagInt,
        offset: usize,
        declared: u32,
        consumed: usize,
    },

    #[error("{tag} at {offset:#x} declares {declared} bytes, below its fixed length {minimum}")]
    RecordTooSmall {
        tag: TagInt,
        offset: usize,
        declared: u32,
        minimum: usize,
    },

    #[error("{tag} at {offset:#x} declares {size} bytes, not a multiple of 4")]
    UnalignedSize {
        tag: TagInt,
        offset: usize,
        size: u32,
    },

    #[error("bad record size (start: {start:#x}, end: {end:#x})")]
    BadRecordSize { start: usize, end: usize },

    #[error("malformed {tag} at {offset:#x}: {reason}")]
    MalformedString {
        tag: TagInt,
        offset: usize,
        reason: &'static str,
    },

    #[error("{tag} value {value:?} contains a NUL byte")]
    InteriorNul { tag: TagInt, value: String },

    #[error("checksum mismatch: stored 0x{stored:08x}, computed 0x{computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("root record tag {actual} is not a CFR root")]
    NotARoot { actual: TagInt },

    #[error("buffer length {len} is not 4-byte aligned")]
    UnalignedBuffer { len: usize },
}
