use crate::format::{
    COMMENT_FIXED_LEN, ENUM_VALUE_FIXED_LEN, FORM_FIXED_LEN, NUMERIC_OPTION_FIXED_LEN,
    ROOT_FIXED_LEN, VARCHAR_FIXED_LEN, VARCHAR_OPTION_FIXED_LEN,
};
use anyhow::{anyhow, Result};
use derive_more::{Deref, From, Into};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::any;
use std::fmt;

/// The raw on-wire discriminator. May hold values outside [`Tag`].
#[derive(From, Into, Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct TagInt(u32);
impl From<Tag> for TagInt {
    fn from(tag: Tag) -> Self {
        // Every Tag discriminant fits in u32 by its repr.
        Self(tag.to_u32().unwrap_or_default())
    }
}
impl TagInt {
    pub fn tag(self) -> Option<Tag> {
        Tag::from_u32(self.0)
    }
}
impl fmt::Display for TagInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => write!(f, "'{}'", tag.describe()),
            None => write!(f, "'UNKNOWN (0x{:x})'", self.0),
        }
    }
}

/// The closed tag vocabulary. The numeric values are fixed by existing blobs.
#[repr(u32)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, ToPrimitive, Debug)]
pub enum Tag {
    Root = 0x0100,
    OptionForm = 0x0101,
    EnumValue = 0x0102,
    OptionEnum = 0x0103,
    OptionNumber = 0x0104,
    OptionBool = 0x0105,
    OptionVarchar = 0x0106,
    VarcharOptName = 0x0107,
    VarcharUiName = 0x0108,
    VarcharUiHelptext = 0x0109,
    VarcharDefValue = 0x010a,
    OptionComment = 0x010b,
}
impl TryFrom<TagInt> for Tag {
    type Error = anyhow::Error;
    fn try_from(int: TagInt) -> Result<Self> {
        int.tag().ok_or(anyhow!(
            "Unknown {} 0x{:x}",
            any::type_name::<TagInt>(),
            int.0
        ))
    }
}

impl Tag {
    pub fn describe(self) -> &'static str {
        match self {
            Tag::Root => "Root record",
            Tag::OptionForm => "Form",
            Tag::EnumValue => "Enum value",
            Tag::OptionEnum => "Enum option",
            Tag::OptionNumber => "Number option",
            Tag::OptionBool => "Bool option",
            Tag::OptionVarchar => "Varchar option",
            Tag::VarcharOptName => "Option name",
            Tag::VarcharUiName => "UI name",
            Tag::VarcharUiHelptext => "UI help text",
            Tag::VarcharDefValue => "Default value",
            Tag::OptionComment => "Option comment",
        }
    }

    /// Whether the record may appear in a form's (or the root's) option list.
    pub fn is_option(self) -> bool {
        match self {
            Tag::OptionForm
            | Tag::OptionEnum
            | Tag::OptionNumber
            | Tag::OptionBool
            | Tag::OptionVarchar
            | Tag::OptionComment => true,
            Tag::Root
            | Tag::EnumValue
            | Tag::VarcharOptName
            | Tag::VarcharUiName
            | Tag::VarcharUiHelptext
            | Tag::VarcharDefValue => false,
        }
    }

    pub fn is_varchar(self) -> bool {
        matches!(
            self,
            Tag::VarcharOptName | Tag::VarcharUiName | Tag::VarcharUiHelptext | Tag::VarcharDefValue
        )
    }

    /// Length of the header plus the fixed fields, i.e. the smallest legal `size`.
    pub fn fixed_len(self) -> usize {
        match self {
            Tag::Root => ROOT_FIXED_LEN,
            Tag::OptionForm => FORM_FIXED_LEN,
            Tag::EnumValue => ENUM_VALUE_FIXED_LEN,
            Tag::OptionEnum | Tag::OptionNumber | Tag::OptionBool => NUMERIC_OPTION_FIXED_LEN,
            Tag::OptionVarchar => VARCHAR_OPTION_FIXED_LEN,
            Tag::OptionComment => COMMENT_FIXED_LEN,
            Tag::VarcharOptName
            | Tag::VarcharUiName
            | Tag::VarcharUiHelptext
            | Tag::VarcharDefValue => VARCHAR_FIXED_LEN,
        }
    }
}
