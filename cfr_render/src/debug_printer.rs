use anyhow::Result;
use cfr_types::decoder::{
    Children, CommentRecord, EnumValueRecord, FormRecord, NumericOptionRecord, RecordHeader,
    RootRecord, VarcharOptionRecord, VarcharRecord, Visitor,
};
use cfr_types::format::OptionFlags;
use itertools::Itertools;
use shorthand::ShortHand;
use std::fmt::Display;
use std::io::Write;

/// Dumps every record with its header, fields and string leaves, one brace-delimited block per record.
#[derive(ShortHand)]
#[shorthand(disable(get))]
pub struct DebugPrinter<W> {
    #[shorthand(enable(get))]
    w: W,
    depth: usize,
}

impl<W: Write> DebugPrinter<W> {
    pub fn new(w: W) -> Self {
        Self { w, depth: 0 }
    }

    pub fn into_inner(self) -> W {
        self.w
    }

    fn tabs(&mut self) -> Result<()> {
        for _ in 0..self.depth {
            self.w.write_all(b"\t")?;
        }
        Ok(())
    }

    fn line(&mut self, text: impl Display) -> Result<()> {
        self.tabs()?;
        writeln!(self.w, "{text}")?;
        Ok(())
    }

    /// Starts a `prop:` line. The caller finishes it.
    fn prop(&mut self, prop: &str) -> Result<()> {
        self.tabs()?;
        write!(self.w, "{prop}:")?;
        Ok(())
    }

    fn prop_val(&mut self, prop: &str, val: impl Display) -> Result<()> {
        self.tabs()?;
        writeln!(self.w, "{:<12} {val}", format!("{prop}:"))?;
        Ok(())
    }

    fn open(&mut self) -> Result<()> {
        self.line('{')?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.depth -= 1;
        let end = if self.depth > 0 { ',' } else { ';' };
        self.line(format!("}}{end}"))
    }

    fn record(&mut self, header: &RecordHeader) -> Result<()> {
        self.line(format!("CFR {}:", header.tag))?;
        self.prop_val("tag", format!("{:#x}", *header.tag))?;
        self.prop_val("size", header.size)
    }

    fn common(&mut self, header: &RecordHeader, object_id: u32, flags: OptionFlags) -> Result<()> {
        self.record(header)?;
        self.prop_val("object ID", object_id)?;
        self.prop_val("flags", describe_flags(flags))
    }

    fn varchar(&mut self, prop: &str, varchar: &VarcharRecord) -> Result<()> {
        self.prop(prop)?;
        writeln!(self.w)?;
        self.open()?;
        self.record(&varchar.header)?;
        self.prop_val("data length", varchar.data_length)?;
        self.prop_val("data", format!("{:?}", varchar.value))?;
        self.close()
    }

    fn helptext(&mut self, helptext: &Option<VarcharRecord>) -> Result<()> {
        match helptext {
            Some(varchar) => self.varchar("UI help text", varchar),
            None => {
                self.prop("UI help text")?;
                writeln!(self.w, " <not found>")?;
                Ok(())
            }
        }
    }

    /// Steps through `children`, wrapping each in its own braces.
    fn list(&mut self, prop: &str, children: &mut Children<'_, '_>) -> Result<()> {
        self.prop(prop)?;
        writeln!(self.w)?;
        while children.has_next() {
            self.open()?;
            children.next(self)?;
            self.close()?;
        }
        Ok(())
    }

    fn numeric(&mut self, opt: &NumericOptionRecord) -> Result<()> {
        self.common(&opt.header, *opt.object_id, opt.flags)?;
        self.prop_val("defval", opt.default_value)?;
        self.varchar("option name", &opt.opt_name)?;
        self.varchar("UI name", &opt.ui_name)?;
        self.helptext(&opt.ui_helptext)
    }
}

/// `0x9 (read-only, volatile)`, or `0x0 (none)`.
pub fn describe_flags(flags: OptionFlags) -> String {
    let names = if flags.is_empty() {
        String::from("none")
    } else {
        flags.names().join(", ")
    };
    format!("{:#x} ({names})", *flags)
}

impl<W: Write> Visitor for DebugPrinter<W> {
    fn visit_root(&mut self, root: &RootRecord, forms: &mut Children<'_, '_>) -> Result<()> {
        self.record(&root.header)?;
        self.prop_val("checksum", format!("{:#x}", root.checksum))?;
        if !root.checksum_matches() {
            self.prop_val("computed", format!("{:#x}", root.computed_checksum))?;
        }
        self.list("form list", forms)?;

        writeln!(self.w, "length:  {}", forms.consumed())?;
        writeln!(self.w, "size:    {}", root.header.size)?;
        writeln!(self.w, "depth:   {}", self.depth)?;
        Ok(())
    }

    fn visit_form(&mut self, form: &FormRecord, objects: &mut Children<'_, '_>) -> Result<()> {
        self.common(&form.header, *form.object_id, form.flags)?;
        self.varchar("UI name", &form.ui_name)?;
        self.list("object list", objects)
    }

    fn visit_enum(&mut self, opt: &NumericOptionRecord, values: &mut Children<'_, '_>) -> Result<()> {
        self.numeric(opt)?;
        self.list("enum values", values)
    }

    fn visit_enum_value(&mut self, val: &EnumValueRecord) -> Result<()> {
        self.record(&val.header)?;
        self.prop_val("value", val.value)?;
        self.varchar("UI name", &val.ui_name)
    }

    fn visit_number(&mut self, opt: &NumericOptionRecord) -> Result<()> {
        self.numeric(opt)
    }

    fn visit_bool(&mut self, opt: &NumericOptionRecord) -> Result<()> {
        self.numeric(opt)
    }

    fn visit_varchar(&mut self, opt: &VarcharOptionRecord) -> Result<()> {
        self.common(&opt.header, *opt.object_id, opt.flags)?;
        self.varchar("defval", &opt.default_value)?;
        self.varchar("option name", &opt.opt_name)?;
        self.varchar("UI name", &opt.ui_name)?;
        self.helptext(&opt.ui_helptext)
    }

    fn visit_comment(&mut self, comment: &CommentRecord) -> Result<()> {
        self.common(&comment.header, *comment.object_id, comment.flags)?;
        self.varchar("UI name", &comment.ui_name)?;
        self.helptext(&comment.ui_helptext)
    }

    fn visit_unknown(&mut self, header: &RecordHeader) -> Result<()> {
        log::debug!("Dumping only the header of {} at {:#x}", header.tag, header.offset);
        self.record(header)
    }
}
