//! Serializes a [`SetupMenuRoot`] into a CFR blob.
//!
//! Every record is written front to back: header with a placeholder size, fixed
//! fields, children, zero padding. Only then is the size known, and it is
//! patched into the header. The root's checksum is patched in last.


use crate::checksum::crc32;
use crate::format::{
    align_up, is_aligned, OptionFlags, Tag, TagInt, HEADER_LEN, ROOT_CHECKSUM_OFFSET,
    SIZE_FIELD_OFFSET,
};
use crate::model::{
    present_helptext, CommentOption, EnumValue, Form, ObjectId, SetupMenuRoot, SmObject,
    VarcharOption,
};
use crate::CfrError;
use anyhow::Result;
use derive_more::Deref;

/// Bytes written for one record, padding included. Equals the record's `size`.
#[derive(Deref, Clone, Copy, Debug)]
pub struct WriteLen(usize);

/// Where the root landed in the output buffer.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct EncodedRoot {
    pub offset: usize,
    pub size: u32,
    pub checksum: u32,
}

pub fn encode(root: &SetupMenuRoot) -> Result<Vec<u8>> {
    let mut buf = vec![];
    encode_into(root, &mut buf)?;
    Ok(buf)
}

/// Appends the root record to `buf`, whose current length must be 4-byte aligned.
pub fn encode_into(root: &SetupMenuRoot, buf: &mut Vec<u8>) -> Result<EncodedRoot> {
    if !is_aligned(buf.len()) {
        return Err(CfrError::UnalignedBuffer { len: buf.len() }.into());
    }

    let mut w = CfrWriter { buf };

    let start = w.begin_record(Tag::Root);
    let mut w_len = HEADER_LEN;
    w_len += w.put_u32(0); // checksum
    for form in &root.forms {
        w_len += *w.write_form(form)?;
    }
    let w_len = w.end_record(start, w_len)?;
    let end = start + *w_len;
    let size = record_size(start, end)?;

    let checksum = crc32(&w.buf[start..end]);
    w.patch_u32(start + ROOT_CHECKSUM_OFFSET, checksum);

    log::debug!("CFR: Written {size} bytes of CFR structures at offset {start}, with CRC32 0x{checksum:08x}");

    Ok(EncodedRoot {
        offset: start,
        size,
        checksum,
    })
}

/// Size of the record spanning `start..end`, which must fit the 32-bit size field.
pub fn record_size(start: usize, end: usize) -> Result<u32, CfrError> {
    if start > end {
        return Err(CfrError::BadRecordSize { start, end });
    }
    u32::try_from(end - start).map_err(|_| CfrError::BadRecordSize { start, end })
}

struct CfrWriter<'b> {
    buf: &'b mut Vec<u8>,
}

impl<'b> CfrWriter<'b> {
    fn pos(&self) -> usize {
        self.buf.len()
    }

    fn put_u32(&mut self, val: u32) -> usize {
        let bytes = val.to_le_bytes();
        self.buf.extend_from_slice(&bytes);
        bytes.len()
    }

    fn patch_u32(&mut self, at: usize, val: u32) {
        self.buf[at..at + 4].copy_from_slice(&val.to_le_bytes());
    }

    /// Writes `tag` and a zero size. Returns the record's start offset.
    fn begin_record(&mut self, tag: Tag) -> usize {
        let start = self.pos();
        self.put_u32(*TagInt::from(tag));
        self.put_u32(0);
        start
    }

    /// Pads to the alignment boundary and back-patches the size.
    ///
    /// `w_len` is what the caller counts as written since `start`, padding excluded.
    fn end_record(&mut self, start: usize, w_len: usize) -> Result<WriteLen> {
        let padded = align_up(self.pos());
        self.buf.resize(padded, 0);

        let size = record_size(start, self.pos())?;
        if size as usize != align_up(w_len) {
            let tag = u32::from_le_bytes([
                self.buf[start],
                self.buf[start + 1],
                self.buf[start + 2],
                self.buf[start + 3],
            ]);
            return Err(CfrError::SizeMismatch {
                tag: TagInt::from(tag),
                offset: start,
                declared: size,
                consumed: w_len,
            }
            .into());
        }
        self.patch_u32(start + SIZE_FIELD_OFFSET, size);
        Ok(WriteLen(size as usize))
    }

    fn write_varchar(&mut self, tag: Tag, string: &str) -> Result<WriteLen> {
        if string.as_bytes().contains(&0) {
            return Err(CfrError::InteriorNul {
                tag: tag.into(),
                value: string.to_owned(),
            }
            .into());
        }

        let start = self.begin_record(tag);
        let mut w_len = HEADER_LEN;
        let data_length_at = self.pos();
        w_len += self.put_u32(0);

        let data_start = self.pos();
        self.buf.extend_from_slice(string.as_bytes());
        self.buf.push(0);
        let data_length = record_size(data_start, self.pos())?;
        self.patch_u32(data_length_at, data_length);
        w_len += data_length as usize;

        self.end_record(start, w_len)
    }

    fn write_opt_name(&mut self, string: &str) -> Result<WriteLen> {
        self.write_varchar(Tag::VarcharOptName, string)
    }

    fn write_ui_name(&mut self, string: &str) -> Result<WriteLen> {
        self.write_varchar(Tag::VarcharUiName, string)
    }

    fn write_default_value(&mut self, string: &str) -> Result<WriteLen> {
        self.write_varchar(Tag::VarcharDefValue, string)
    }

    fn write_ui_helptext(&mut self, string: &Option<String>) -> Result<WriteLen> {
        match present_helptext(string) {
            None => Ok(WriteLen(0)),
            Some(s) => self.write_varchar(Tag::VarcharUiHelptext, s),
        }
    }

    fn write_enum_value(&mut self, e: &EnumValue) -> Result<WriteLen> {
        let start = self.begin_record(Tag::EnumValue);
        let mut w_len = HEADER_LEN;
        w_len += self.put_u32(e.value);
        w_len += *self.write_ui_name(&e.ui_name)?;
        self.end_record(start, w_len)
    }

    #[allow(clippy::too_many_arguments)]
    fn write_numeric_option(
        &mut self,
        tag: Tag,
        object_id: ObjectId,
        flags: OptionFlags,
        opt_name: &str,
        ui_name: &str,
        ui_helptext: &Option<String>,
        default_value: u32,
        values: &[EnumValue],
    ) -> Result<WriteLen> {
        let start = self.begin_record(tag);
        let mut w_len = HEADER_LEN;
        w_len += self.put_u32(*object_id);
        w_len += self.put_u32(*flags);
        w_len += self.put_u32(default_value);

        w_len += *self.write_opt_name(opt_name)?;
        w_len += *self.write_ui_name(ui_name)?;
        w_len += *self.write_ui_helptext(ui_helptext)?;

        if tag == Tag::OptionEnum {
            for e in values {
                w_len += *self.write_enum_value(e)?;
            }
        }

        self.end_record(start, w_len)
    }

    fn write_varchar_option(&mut self, opt: &VarcharOption) -> Result<WriteLen> {
        let start = self.begin_record(Tag::OptionVarchar);
        let mut w_len = HEADER_LEN;
        w_len += self.put_u32(*opt.object_id);
        w_len += self.put_u32(*opt.flags);

        w_len += *self.write_default_value(&opt.default_value)?;
        w_len += *self.write_opt_name(&opt.opt_name)?;
        w_len += *self.write_ui_name(&opt.ui_name)?;
        w_len += *self.write_ui_helptext(&opt.ui_helptext)?;

        self.end_record(start, w_len)
    }

    fn write_comment(&mut self, comment: &CommentOption) -> Result<WriteLen> {
        let start = self.begin_record(Tag::OptionComment);
        let mut w_len = HEADER_LEN;
        w_len += self.put_u32(*comment.object_id);
        w_len += self.put_u32(*comment.flags);

        w_len += *self.write_ui_name(&comment.ui_name)?;
        w_len += *self.write_ui_helptext(&comment.ui_helptext)?;

        self.end_record(start, w_len)
    }

    fn write_form(&mut self, form: &Form) -> Result<WriteLen> {
        let start = self.begin_record(Tag::OptionForm);
        let mut w_len = HEADER_LEN;
        w_len += self.put_u32(*form.object_id);
        w_len += self.put_u32(*form.flags);

        w_len += *self.write_ui_name(&form.ui_name)?;
        for obj in &form.objects {
            w_len += *self.write_object(obj)?;
        }

        self.end_record(start, w_len)
    }

    fn write_object(&mut self, obj: &SmObject) -> Result<WriteLen> {
        match obj {
            SmObject::Enum(o) => self.write_numeric_option(
                Tag::OptionEnum,
                o.object_id,
                o.flags,
                &o.opt_name,
                &o.ui_name,
                &o.ui_helptext,
                o.default_value,
                &o.values,
            ),
            SmObject::Number(o) => self.write_numeric_option(
                Tag::OptionNumber,
                o.object_id,
                o.flags,
                &o.opt_name,
                &o.ui_name,
                &o.ui_helptext,
                o.default_value,
                &[],
            ),
            SmObject::Bool(o) => self.write_numeric_option(
                Tag::OptionBool,
                o.object_id,
                o.flags,
                &o.opt_name,
                &o.ui_name,
                &o.ui_helptext,
                o.default_value as u32,
                &[],
            ),
            SmObject::Varchar(o) => self.write_varchar_option(o),
            SmObject::Comment(o) => self.write_comment(o),
            SmObject::Form(o) => self.write_form(o),
        }
    }
}
