//! Validates a CFR blob while walking it, and shows each record to a [`Visitor`].
//!
//! Decoding and presentation are interleaved: nothing is materialized besides
//! the record currently being shown. The decoder holds a read cursor; each
//! container passes its own end offset down as the limit for its children.
//!
//! Every record is checked for:
//! - a 4-byte aligned start,
//! - a header and declared size that fit within the parent,
//! - a size that is a multiple of 4 and no smaller than its fixed fields,
//! - the expected tag, where only one tag is acceptable,
//! - exact consumption of its declared size by its fields and children.
//!
//! A string leaf is sized to its data plus padding, nothing more.
//! The optional help text is the one string whose absence is not an error.
//! Tags outside the vocabulary are skipped by size, in child lists only.

mod records;
mod visitor;

pub use records::*;
pub use visitor::*;

use crate::checksum::Crc32;
use crate::format::{align_up, is_aligned, Tag, TagInt, HEADER_LEN, ROOT_CHECKSUM_OFFSET};
use crate::model::ObjectId;
use crate::CfrError;
use anyhow::{anyhow, Result};
use std::str::{self, FromStr};

/// What to do when the stored root checksum does not match the contents.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum ChecksumPolicy {
    /// Fail with [`CfrError::ChecksumMismatch`] before visiting anything.
    #[default]
    Strict,
    /// Log a warning and decode anyway. [`RootRecord::checksum_matches`] tells visitors.
    Advisory,
}
impl FromStr for ChecksumPolicy {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "advisory" => Ok(Self::Advisory),
            _ => Err(anyhow!(
                "Unknown checksum policy {s:?}, expected \"strict\" or \"advisory\""
            )),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct DecodeOptions {
    pub checksum_policy: ChecksumPolicy,
}

pub fn decode<V: Visitor + ?Sized>(buf: &[u8], visitor: &mut V) -> Result<()> {
    decode_with(buf, DecodeOptions::default(), visitor)
}

/// Decodes the root record at the start of `buf`. Bytes past the root's declared size are ignored.
pub fn decode_with<V: Visitor + ?Sized>(
    buf: &[u8],
    opts: DecodeOptions,
    visitor: &mut V,
) -> Result<()> {
    let mut dec = Decoder { buf, pos: 0 };
    dec.read_root(opts, visitor)
}

pub(crate) struct Decoder<'b> {
    buf: &'b [u8],
    pos: usize,
}

impl<'b> Decoder<'b> {
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /* Primitive reads. Bounds are established by check_extent() beforehand. */

    fn u32_at(&self, at: usize) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.buf[at..at + 4]);
        u32::from_le_bytes(bytes)
    }

    fn read_u32(&mut self) -> u32 {
        let val = self.u32_at(self.pos);
        self.pos += 4;
        val
    }

    /* Record framing */

    fn peek_header(&self, limit: usize) -> Result<RecordHeader> {
        let offset = self.pos;
        if !is_aligned(offset) {
            return Err(CfrError::Misaligned { offset }.into());
        }
        if offset + HEADER_LEN > limit {
            return Err(CfrError::Truncated {
                offset,
                needed: HEADER_LEN,
                available: limit.saturating_sub(offset),
            }
            .into());
        }
        Ok(RecordHeader {
            tag: TagInt::from(self.u32_at(offset)),
            size: self.u32_at(offset + 4),
            offset,
        })
    }

    fn check_extent(&self, hdr: &RecordHeader, fixed_len: usize, limit: usize) -> Result<()> {
        if (hdr.size as usize) < fixed_len {
            return Err(CfrError::RecordTooSmall {
                tag: hdr.tag,
                offset: hdr.offset,
                declared: hdr.size,
                minimum: fixed_len,
            }
            .into());
        }
        if !is_aligned(hdr.size as usize) {
            return Err(CfrError::UnalignedSize {
                tag: hdr.tag,
                offset: hdr.offset,
                size: hdr.size,
            }
            .into());
        }
        if hdr.end() > limit {
            return Err(CfrError::Truncated {
                offset: hdr.offset,
                needed: hdr.size as usize,
                available: limit.saturating_sub(hdr.offset),
            }
            .into());
        }
        Ok(())
    }

    /// Reads the header of a record that must carry `tag`, leaving the cursor on its fixed fields.
    fn expect_record(&mut self, tag: Tag, limit: usize) -> Result<RecordHeader> {
        let hdr = self.peek_header(limit)?;
        if hdr.tag != TagInt::from(tag) {
            return Err(CfrError::TagMismatch {
                expected: tag.into(),
                actual: hdr.tag,
                offset: hdr.offset,
            }
            .into());
        }
        self.check_extent(&hdr, tag.fixed_len(), limit)?;
        self.pos += HEADER_LEN;
        Ok(hdr)
    }

    pub(crate) fn expect_end(&self, hdr: &RecordHeader) -> Result<()> {
        if self.pos != hdr.end() {
            return Err(CfrError::SizeMismatch {
                tag: hdr.tag,
                offset: hdr.offset,
                declared: hdr.size,
                consumed: self.pos - hdr.offset,
            }
            .into());
        }
        Ok(())
    }

    /* Strings */

    fn read_varchar(&mut self, tag: Tag, limit: usize) -> Result<VarcharRecord> {
        if self.pos >= limit {
            return Err(CfrError::MissingRecord {
                expected: tag.into(),
                offset: self.pos,
            }
            .into());
        }

        let hdr = self.expect_record(tag, limit)?;
        let data_length = self.read_u32();

        let malformed = |reason| CfrError::MalformedString {
            tag: hdr.tag,
            offset: hdr.offset,
            reason,
        };

        let data_start = self.pos;
        let data_end = data_start + data_length as usize;
        if data_end > hdr.end() {
            return Err(malformed("data length exceeds the record size").into());
        }
        let (terminator, payload) = self.buf[data_start..data_end]
            .split_last()
            .ok_or(malformed("data length is zero, so there is no terminator"))?;
        if *terminator != 0 {
            return Err(malformed("data is not NUL-terminated").into());
        }
        if payload.contains(&0) {
            return Err(malformed("data has a NUL before its terminator").into());
        }
        let value = str::from_utf8(payload)
            .map_err(|_| malformed("data is not valid UTF-8"))?
            .to_owned();

        // Only padding may follow the data.
        self.pos = align_up(data_end);
        self.expect_end(&hdr)?;

        Ok(VarcharRecord {
            header: hdr,
            data_length,
            value,
        })
    }

    /// Like [`Self::read_varchar`], but a different tag (or no room) means "absent", and the cursor stays put.
    fn read_optional_varchar(&mut self, tag: Tag, limit: usize) -> Result<Option<VarcharRecord>> {
        if self.pos >= limit {
            return Ok(None);
        }
        let hdr = self.peek_header(limit)?;
        if hdr.tag != TagInt::from(tag) {
            return Ok(None);
        }
        self.read_varchar(tag, limit).map(Some)
    }

    /* Records */

    fn read_root<V: Visitor + ?Sized>(&mut self, opts: DecodeOptions, visitor: &mut V) -> Result<()> {
        let limit = self.buf.len();
        let hdr = self.expect_record(Tag::Root, limit)?;
        let checksum = self.read_u32();

        let field_at = hdr.offset + ROOT_CHECKSUM_OFFSET;
        let computed_checksum = Crc32::new()
            .update(&self.buf[hdr.offset..field_at])
            .update_zeroed(4)
            .update(&self.buf[field_at + 4..hdr.end()])
            .finish();

        if checksum != computed_checksum {
            let err = CfrError::ChecksumMismatch {
                stored: checksum,
                computed: computed_checksum,
            };
            match opts.checksum_policy {
                ChecksumPolicy::Strict => return Err(err.into()),
                ChecksumPolicy::Advisory => log::warn!("{err}; decoding anyway"),
            }
        }
        if hdr.end() < limit {
            log::debug!("Ignoring {} bytes after the root record", limit - hdr.end());
        }

        let root = RootRecord {
            header: hdr,
            checksum,
            computed_checksum,
        };
        let mut forms = Children::new(self, hdr, Section::Options);
        visitor.visit_root(&root, &mut forms)?;
        forms.finish()
    }

    /// Decodes whichever option sits at the cursor.
    pub(crate) fn read_object<V: Visitor + ?Sized>(
        &mut self,
        limit: usize,
        visitor: &mut V,
    ) -> Result<()> {
        let hdr = self.peek_header(limit)?;
        let tag = match hdr.tag.tag() {
            None => return self.skip_unknown(&hdr, limit, visitor),
            Some(tag) if !tag.is_option() => {
                return Err(CfrError::UnexpectedRecord {
                    actual: hdr.tag,
                    section: "an option list",
                    offset: hdr.offset,
                }
                .into())
            }
            Some(tag) => tag,
        };
        match tag {
            Tag::OptionForm => self.read_form(limit, visitor),
            Tag::OptionEnum | Tag::OptionNumber | Tag::OptionBool => {
                self.read_numeric_option(tag, limit, visitor)
            }
            Tag::OptionVarchar => self.read_varchar_option(limit, visitor),
            // Only comments are left.
            _ => self.read_comment(limit, visitor),
        }
    }

    pub(crate) fn read_enum_value_entry<V: Visitor + ?Sized>(
        &mut self,
        limit: usize,
        visitor: &mut V,
    ) -> Result<()> {
        let hdr = self.peek_header(limit)?;
        match hdr.tag.tag() {
            Some(Tag::EnumValue) => self.read_enum_value(limit, visitor),
            Some(_) => Err(CfrError::TagMismatch {
                expected: Tag::EnumValue.into(),
                actual: hdr.tag,
                offset: hdr.offset,
            }
            .into()),
            None => self.skip_unknown(&hdr, limit, visitor),
        }
    }

    fn skip_unknown<V: Visitor + ?Sized>(
        &mut self,
        hdr: &RecordHeader,
        limit: usize,
        visitor: &mut V,
    ) -> Result<()> {
        self.check_extent(hdr, HEADER_LEN, limit)?;
        log::trace!("Skipping {} record of {} bytes at {:#x}", hdr.tag, hdr.size, hdr.offset);
        self.pos = hdr.end();
        visitor.visit_unknown(hdr)
    }

    fn read_form<V: Visitor + ?Sized>(&mut self, limit: usize, visitor: &mut V) -> Result<()> {
        let hdr = self.expect_record(Tag::OptionForm, limit)?;
        let object_id = ObjectId::from(self.read_u32());
        let flags = self.read_u32().into();
        let ui_name = self.read_varchar(Tag::VarcharUiName, hdr.end())?;

        let form = FormRecord {
            header: hdr,
            object_id,
            flags,
            ui_name,
        };
        let mut objects = Children::new(self, hdr, Section::Options);
        visitor.visit_form(&form, &mut objects)?;
        objects.finish()
    }

    fn read_numeric_option<V: Visitor + ?Sized>(
        &mut self,
        tag: Tag,
        limit: usize,
        visitor: &mut V,
    ) -> Result<()> {
        let hdr = self.expect_record(tag, limit)?;
        let object_id = ObjectId::from(self.read_u32());
        let flags = self.read_u32().into();
        let default_value = self.read_u32();

        let end = hdr.end();
        let opt_name = self.read_varchar(Tag::VarcharOptName, end)?;
        let ui_name = self.read_varchar(Tag::VarcharUiName, end)?;
        let ui_helptext = self.read_optional_varchar(Tag::VarcharUiHelptext, end)?;

        let opt = NumericOptionRecord {
            header: hdr,
            object_id,
            flags,
            default_value,
            opt_name,
            ui_name,
            ui_helptext,
        };
        match tag {
            Tag::OptionEnum => {
                let mut values = Children::new(self, hdr, Section::EnumValues);
                visitor.visit_enum(&opt, &mut values)?;
                values.finish()
            }
            Tag::OptionBool => {
                self.expect_end(&hdr)?;
                visitor.visit_bool(&opt)
            }
            _ => {
                self.expect_end(&hdr)?;
                visitor.visit_number(&opt)
            }
        }
    }

    fn read_enum_value<V: Visitor + ?Sized>(&mut self, limit: usize, visitor: &mut V) -> Result<()> {
        let hdr = self.expect_record(Tag::EnumValue, limit)?;
        let value = self.read_u32();
        let ui_name = self.read_varchar(Tag::VarcharUiName, hdr.end())?;
        self.expect_end(&hdr)?;

        visitor.visit_enum_value(&EnumValueRecord {
            header: hdr,
            value,
            ui_name,
        })
    }

    fn read_varchar_option<V: Visitor + ?Sized>(
        &mut self,
        limit: usize,
        visitor: &mut V,
    ) -> Result<()> {
        let hdr = self.expect_record(Tag::OptionVarchar, limit)?;
        let object_id = ObjectId::from(self.read_u32());
        let flags = self.read_u32().into();

        let end = hdr.end();
        let default_value = self.read_varchar(Tag::VarcharDefValue, end)?;
        let opt_name = self.read_varchar(Tag::VarcharOptName, end)?;
        let ui_name = self.read_varchar(Tag::VarcharUiName, end)?;
        let ui_helptext = self.read_optional_varchar(Tag::VarcharUiHelptext, end)?;
        self.expect_end(&hdr)?;

        visitor.visit_varchar(&VarcharOptionRecord {
            header: hdr,
            object_id,
            flags,
            default_value,
            opt_name,
            ui_name,
            ui_helptext,
        })
    }

    fn read_comment<V: Visitor + ?Sized>(&mut self, limit: usize, visitor: &mut V) -> Result<()> {
        let hdr = self.expect_record(Tag::OptionComment, limit)?;
        let object_id = ObjectId::from(self.read_u32());
        let flags = self.read_u32().into();

        let end = hdr.end();
        let ui_name = self.read_varchar(Tag::VarcharUiName, end)?;
        let ui_helptext = self.read_optional_varchar(Tag::VarcharUiHelptext, end)?;
        self.expect_end(&hdr)?;

        visitor.visit_comment(&CommentRecord {
            header: hdr,
            object_id,
            flags,
            ui_name,
            ui_helptext,
        })
    }
}
