use crate::format::{OptionFlags, Tag};
use crate::model::ObjectId;
use derive_more::From;

/// The top-level menu: a list of forms, each usually rendered as a tab.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct SetupMenuRoot {
    pub forms: Vec<Form>,
}

/// A titled group of options. Forms nest.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Form {
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub ui_name: String,
    pub objects: Vec<SmObject>,
}

/// One entry of a form.
#[derive(From, PartialEq, Eq, Clone, Debug)]
pub enum SmObject {
    Enum(EnumOption),
    Number(NumberOption),
    Bool(BoolOption),
    Varchar(VarcharOption),
    Comment(CommentOption),
    Form(Form),
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct EnumValue {
    pub ui_name: String,
    pub value: u32,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct EnumOption {
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub opt_name: String,
    pub ui_name: String,
    pub ui_helptext: Option<String>,
    pub default_value: u32,
    pub values: Vec<EnumValue>,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct NumberOption {
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub opt_name: String,
    pub ui_name: String,
    pub ui_helptext: Option<String>,
    pub default_value: u32,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct BoolOption {
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub opt_name: String,
    pub ui_name: String,
    pub ui_helptext: Option<String>,
    pub default_value: bool,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct VarcharOption {
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub opt_name: String,
    pub ui_name: String,
    pub ui_helptext: Option<String>,
    pub default_value: String,
}

/// A static label, akin to a Kconfig comment. Not a string option.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct CommentOption {
    pub object_id: ObjectId,
    pub flags: OptionFlags,
    pub ui_name: String,
    pub ui_helptext: Option<String>,
}

impl EnumValue {
    pub fn new(ui_name: impl Into<String>, value: u32) -> Self {
        Self {
            ui_name: ui_name.into(),
            value,
        }
    }
}

impl SmObject {
    pub fn tag(&self) -> Tag {
        match self {
            SmObject::Enum(_) => Tag::OptionEnum,
            SmObject::Number(_) => Tag::OptionNumber,
            SmObject::Bool(_) => Tag::OptionBool,
            SmObject::Varchar(_) => Tag::OptionVarchar,
            SmObject::Comment(_) => Tag::OptionComment,
            SmObject::Form(_) => Tag::OptionForm,
        }
    }

    pub fn object_id(&self) -> ObjectId {
        match self {
            SmObject::Enum(o) => o.object_id,
            SmObject::Number(o) => o.object_id,
            SmObject::Bool(o) => o.object_id,
            SmObject::Varchar(o) => o.object_id,
            SmObject::Comment(o) => o.object_id,
            SmObject::Form(o) => o.object_id,
        }
    }
}

/// Help text is optional on the wire; an empty string is written as absent.
pub(crate) fn present_helptext(helptext: &Option<String>) -> Option<&str> {
    helptext.as_deref().filter(|s| !s.is_empty())
}
