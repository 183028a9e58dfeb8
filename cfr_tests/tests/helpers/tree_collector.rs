use anyhow::{anyhow, Result};
use cfr_types::decoder::{
    Children, CommentRecord, EnumValueRecord, FormRecord, NumericOptionRecord, RecordHeader,
    RootRecord, VarcharOptionRecord, VarcharRecord, Visitor,
};
use cfr_types::model::{
    BoolOption, CommentOption, EnumOption, EnumValue, Form, NumberOption, SetupMenuRoot,
    SmObject, VarcharOption,
};
use std::mem;

/// Rebuilds the model from visitor callbacks, so that a decode can be compared with what was encoded.
///
/// Help text comes back as `None` when absent on the wire. See [`normalize`].
#[derive(Default)]
pub struct TreeCollector {
    pub root: SetupMenuRoot,
    pub unknown: Vec<RecordHeader>,
    stack: Vec<Vec<SmObject>>,
    values: Vec<EnumValue>,
}

fn helptext(varchar: &Option<VarcharRecord>) -> Option<String> {
    varchar.as_ref().map(|v| v.value.clone())
}

impl TreeCollector {
    fn push(&mut self, obj: SmObject) -> Result<()> {
        self.stack
            .last_mut()
            .ok_or(anyhow!("{:?} outside of any container", obj.tag()))?
            .push(obj);
        Ok(())
    }

    fn collect_children(&mut self, children: &mut Children<'_, '_>) -> Result<Vec<SmObject>> {
        self.stack.push(vec![]);
        children.walk(self)?;
        self.stack.pop().ok_or(anyhow!("unbalanced stack"))
    }
}

impl Visitor for TreeCollector {
    fn visit_root(&mut self, _root: &RootRecord, forms: &mut Children<'_, '_>) -> Result<()> {
        self.root.forms = self
            .collect_children(forms)?
            .into_iter()
            .map(|obj| match obj {
                SmObject::Form(form) => Ok(form),
                other => Err(anyhow!("{:?} at the top level", other.tag())),
            })
            .collect::<Result<_>>()?;
        Ok(())
    }

    fn visit_form(&mut self, form: &FormRecord, objects: &mut Children<'_, '_>) -> Result<()> {
        let objects = self.collect_children(objects)?;
        self.push(
            Form {
                object_id: form.object_id,
                flags: form.flags,
                ui_name: form.ui_name.value.clone(),
                objects,
            }
            .into(),
        )
    }

    fn visit_enum(&mut self, opt: &NumericOptionRecord, values: &mut Children<'_, '_>) -> Result<()> {
        values.walk(self)?;
        let values = mem::take(&mut self.values);
        self.push(
            EnumOption {
                object_id: opt.object_id,
                flags: opt.flags,
                opt_name: opt.opt_name.value.clone(),
                ui_name: opt.ui_name.value.clone(),
                ui_helptext: helptext(&opt.ui_helptext),
                default_value: opt.default_value,
                values,
            }
            .into(),
        )
    }

    fn visit_enum_value(&mut self, val: &EnumValueRecord) -> Result<()> {
        self.values
            .push(EnumValue::new(val.ui_name.value.clone(), val.value));
        Ok(())
    }

    fn visit_number(&mut self, opt: &NumericOptionRecord) -> Result<()> {
        self.push(
            NumberOption {
                object_id: opt.object_id,
                flags: opt.flags,
                opt_name: opt.opt_name.value.clone(),
                ui_name: opt.ui_name.value.clone(),
                ui_helptext: helptext(&opt.ui_helptext),
                default_value: opt.default_value,
            }
            .into(),
        )
    }

    fn visit_bool(&mut self, opt: &NumericOptionRecord) -> Result<()> {
        self.push(
            BoolOption {
                object_id: opt.object_id,
                flags: opt.flags,
                opt_name: opt.opt_name.value.clone(),
                ui_name: opt.ui_name.value.clone(),
                ui_helptext: helptext(&opt.ui_helptext),
                default_value: opt.default_bool(),
            }
            .into(),
        )
    }

    fn visit_varchar(&mut self, opt: &VarcharOptionRecord) -> Result<()> {
        self.push(
            VarcharOption {
                object_id: opt.object_id,
                flags: opt.flags,
                opt_name: opt.opt_name.value.clone(),
                ui_name: opt.ui_name.value.clone(),
                ui_helptext: helptext(&opt.ui_helptext),
                default_value: opt.default_value.value.clone(),
            }
            .into(),
        )
    }

    fn visit_comment(&mut self, comment: &CommentRecord) -> Result<()> {
        self.push(
            CommentOption {
                object_id: comment.object_id,
                flags: comment.flags,
                ui_name: comment.ui_name.value.clone(),
                ui_helptext: helptext(&comment.ui_helptext),
            }
            .into(),
        )
    }

    fn visit_unknown(&mut self, header: &RecordHeader) -> Result<()> {
        self.unknown.push(*header);
        Ok(())
    }
}

/// Maps empty help text to `None`, which is how it decodes.
pub fn normalize(root: &SetupMenuRoot) -> SetupMenuRoot {
    fn norm_helptext(h: &mut Option<String>) {
        if h.as_deref() == Some("") {
            *h = None;
        }
    }
    fn norm_form(form: &mut Form) {
        for obj in form.objects.iter_mut() {
            match obj {
                SmObject::Enum(o) => norm_helptext(&mut o.ui_helptext),
                SmObject::Number(o) => norm_helptext(&mut o.ui_helptext),
                SmObject::Bool(o) => norm_helptext(&mut o.ui_helptext),
                SmObject::Varchar(o) => norm_helptext(&mut o.ui_helptext),
                SmObject::Comment(o) => norm_helptext(&mut o.ui_helptext),
                SmObject::Form(f) => norm_form(f),
            }
        }
    }

    let mut root = root.clone();
    root.forms.iter_mut().for_each(norm_form);
    root
}
