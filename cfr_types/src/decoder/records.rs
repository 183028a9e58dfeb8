use crate::format::{OptionFlags, TagInt};
use crate::model::ObjectId;

/// The generic `(tag, size)` header, plus where the record sits in the buffer.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct RecordHeader {
    pub tag: TagInt,
    pub size: u32,
    pub offset: usize,
}
impl RecordHeader {
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.size as usize)
    }
}

/// A string leaf. `value` is copied out of the buffer, without its terminator.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct VarcharRecord {
    pub header: RecordHeader,
    pub data_length: u32,
    pub value: String,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RootRecord {
    pub header: RecordHeader,
    pub checksum: u32,
    pub computed_checksum: u32,
}
impl RootRecord {
    pub fn checksum_matches(&self) -> bool {
        self.checksum == self.computed_checksum
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FormRecord {
    pub header: RecordHeader,
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub ui_name: VarcharRecord,
}

/// Shared by enum, number and bool options.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct NumericOptionRecord {
    pub header: RecordHeader,
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub default_value: u32,
    pub opt_name: VarcharRecord,
    pub ui_name: VarcharRecord,
    pub ui_helptext: Option<VarcharRecord>,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct VarcharOptionRecord {
    pub header: RecordHeader,
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub default_value: VarcharRecord,
    pub opt_name: VarcharRecord,
    pub ui_name: VarcharRecord,
    pub ui_helptext: Option<VarcharRecord>,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct CommentRecord {
    pub header: RecordHeader,
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub ui_name: VarcharRecord,
    pub ui_helptext: Option<VarcharRecord>,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct EnumValueRecord {
    pub header: RecordHeader,
    pub value: u32,
    pub ui_name: VarcharRecord,
}

fn helptext_str(helptext: &Option<VarcharRecord>) -> &str {
    helptext.as_ref().map_or("", |h| h.value.as_str())
}

impl NumericOptionRecord {
    /// Help text, or "" when the record has none.
    pub fn helptext(&self) -> &str {
        helptext_str(&self.ui_helptext)
    }

    /// The default of a bool option. Any nonzero value reads as true.
    pub fn default_bool(&self) -> bool {
        self.default_value != 0
    }
}
impl VarcharOptionRecord {
    pub fn helptext(&self) -> &str {
        helptext_str(&self.ui_helptext)
    }
}
impl CommentRecord {
    pub fn helptext(&self) -> &str {
        helptext_str(&self.ui_helptext)
    }
}
