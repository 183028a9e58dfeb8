use crate::decoder::{
    CommentRecord, Decoder, EnumValueRecord, FormRecord, NumericOptionRecord, RecordHeader,
    RootRecord, VarcharOptionRecord,
};
use anyhow::Result;

/// Receives records as the decoder validates them.
///
/// Container records come with a [`Children`] handle. A visitor may walk the
/// children wholesale, step through them one by one (to wrap each child in its
/// own output), or ignore them. Whatever is left unvisited when the method
/// returns is still decoded and validated, just not shown to this visitor.
///
/// The default methods walk every container and ignore every leaf, so an
/// implementor only overrides what it renders.
pub trait Visitor {
    fn visit_root(&mut self, _root: &RootRecord, forms: &mut Children<'_, '_>) -> Result<()> {
        forms.walk(self)
    }

    fn visit_form(&mut self, _form: &FormRecord, objects: &mut Children<'_, '_>) -> Result<()> {
        objects.walk(self)
    }

    fn visit_enum(
        &mut self,
        _opt: &NumericOptionRecord,
        values: &mut Children<'_, '_>,
    ) -> Result<()> {
        values.walk(self)
    }

    fn visit_enum_value(&mut self, _val: &EnumValueRecord) -> Result<()> {
        Ok(())
    }

    fn visit_number(&mut self, _opt: &NumericOptionRecord) -> Result<()> {
        Ok(())
    }

    fn visit_bool(&mut self, _opt: &NumericOptionRecord) -> Result<()> {
        Ok(())
    }

    fn visit_varchar(&mut self, _opt: &VarcharOptionRecord) -> Result<()> {
        Ok(())
    }

    fn visit_comment(&mut self, _comment: &CommentRecord) -> Result<()> {
        Ok(())
    }

    /// A record whose tag is outside the vocabulary. It has been skipped by its size.
    fn visit_unknown(&mut self, _header: &RecordHeader) -> Result<()> {
        Ok(())
    }
}

/// Decodes and validates, showing nothing to anyone.
pub struct PassThrough;
impl Visitor for PassThrough {}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub(crate) enum Section {
    /// Forms and options, as found under the root and under forms.
    Options,
    /// Enum values, as found under an enum option.
    EnumValues,
}

/// The not-yet-decoded children of one container record.
pub struct Children<'d, 'b> {
    dec: &'d mut Decoder<'b>,
    parent: RecordHeader,
    section: Section,
}

impl<'d, 'b> Children<'d, 'b> {
    pub(crate) fn new(dec: &'d mut Decoder<'b>, parent: RecordHeader, section: Section) -> Self {
        Self {
            dec,
            parent,
            section,
        }
    }

    /// Whether unread bytes remain within the parent.
    pub fn has_next(&self) -> bool {
        self.dec.pos() < self.parent.end()
    }

    /// Bytes of the parent decoded so far, header included.
    pub fn consumed(&self) -> usize {
        self.dec.pos() - self.parent.offset
    }

    /// Decodes one child, dispatching to `visitor`. Returns false once none are left.
    pub fn next<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> Result<bool> {
        if !self.has_next() {
            return Ok(false);
        }
        let limit = self.parent.end();
        match self.section {
            Section::Options => self.dec.read_object(limit, visitor)?,
            Section::EnumValues => self.dec.read_enum_value_entry(limit, visitor)?,
        }
        Ok(true)
    }

    pub fn walk<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> Result<()> {
        while self.next(visitor)? {}
        Ok(())
    }

    /// Drains what the visitor left, then checks the parent was consumed exactly.
    pub(crate) fn finish(mut self) -> Result<()> {
        self.walk(&mut PassThrough)?;
        self.dec.expect_end(&self.parent)
    }
}
