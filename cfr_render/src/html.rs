use anyhow::{bail, Result};
use cfr_types::decoder::{
    Children, CommentRecord, EnumValueRecord, FormRecord, NumericOptionRecord, RecordHeader,
    RootRecord, VarcharOptionRecord, Visitor,
};
use cfr_types::format::OptionFlags;
use shorthand::ShortHand;
use std::fmt::Display;
use std::io::Write;
use std::mem;

const FLAG_ATTRS: [(OptionFlags, &str); 4] = [
    (OptionFlags::READONLY, " readonly"),
    (OptionFlags::GRAYOUT, " disabled"),
    (OptionFlags::SUPPRESS, " hidden"),
    (OptionFlags::VOLATILE, ""),
];

/// Renders a blob as a static HTML form: one radio tab per top-level form, one table row per option.
///
/// The output links `style.css` and carries no script; the controls show defaults only.
#[derive(ShortHand)]
#[shorthand(disable(get))]
pub struct HtmlRenderer<W> {
    #[shorthand(enable(get))]
    w: W,
    depth: usize,
    tab_count: u32,
    /// Set while the next record visited is a direct child of the root.
    top_level: bool,
    /// Set while the values of an enum are visited.
    enum_default: Option<u32>,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            depth: 0,
            tab_count: 0,
            top_level: false,
            enum_default: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.w
    }

    fn line(&mut self, text: impl Display) -> Result<()> {
        for _ in 0..self.depth {
            self.w.write_all(b"\t")?;
        }
        writeln!(self.w, "{text}")?;
        Ok(())
    }

    fn open(&mut self, tag: impl Display) -> Result<()> {
        self.line(tag)?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, tag: impl Display) -> Result<()> {
        self.depth -= 1;
        self.line(tag)
    }

    fn cell(&mut self, td: &str, content: impl Display) -> Result<()> {
        self.open(td)?;
        self.line(content)?;
        self.close("</td>")
    }

    fn nested(&self, header: &RecordHeader) -> Result<()> {
        if self.top_level {
            bail!(
                "{} at {:#x} sits at the top level, where only forms can be rendered",
                header.tag,
                header.offset
            );
        }
        Ok(())
    }

    fn label_cell(&mut self, object_id: u32, ui_name: &str) -> Result<()> {
        let label = format!("<label for='object-{object_id}'>{}</label>", escape(ui_name));
        self.cell("<td class='ui-name'>", label)
    }

    fn input_cell(&mut self, input: String) -> Result<()> {
        self.cell("<td class='ui-input'>", input)
    }

    fn helptext_cell(&mut self, helptext: &str) -> Result<()> {
        self.cell("<td>", format!("<span>{}</span>", escape(helptext)))
    }

    fn rows(&mut self, objects: &mut Children<'_, '_>) -> Result<()> {
        while objects.has_next() {
            self.open("<tr>")?;
            objects.next(self)?;
            self.close("</tr>")?;
        }
        Ok(())
    }
}

fn flag_attrs(flags: OptionFlags) -> String {
    FLAG_ATTRS
        .into_iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, attr)| attr)
        .collect()
}

/// Escapes text for use both between tags and inside quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl<W: Write> Visitor for HtmlRenderer<W> {
    fn visit_root(&mut self, root: &RootRecord, forms: &mut Children<'_, '_>) -> Result<()> {
        self.line("<!DOCTYPE html>")?;
        self.open("<html>")?;
        self.open("<head>")?;
        self.line("<link rel='stylesheet' href='style.css'>")?;
        self.close("</head>")?;
        self.open("<body>")?;

        self.open("<label>checksum")?;
        self.line(format!(
            "<input type='text' name='checksum' value='{:#010x}' readonly>",
            root.checksum
        ))?;
        self.close("</label>")?;

        self.open("<div class='tabs'>")?;
        while forms.has_next() {
            self.top_level = true;
            forms.next(self)?;
        }
        self.top_level = false;
        self.close("</div>")?;

        self.close("</body>")?;
        self.close("</html>")
    }

    fn visit_form(&mut self, form: &FormRecord, objects: &mut Children<'_, '_>) -> Result<()> {
        let id = form.object_id;
        let flags = flag_attrs(form.flags);

        if mem::take(&mut self.top_level) {
            self.tab_count += 1;
            let checked = if self.tab_count == 1 { " checked" } else { "" };

            self.open(format!("<div class='tab' id='object-{id}'{flags}>"))?;
            self.line(format!(
                "<input type='radio' id='tab-{id}' name='tab-group'{checked}>"
            ))?;
            self.line(format!(
                "<label class='tab-label' for='tab-{id}'>{}</label>",
                escape(&form.ui_name.value)
            ))?;
            self.open("<div class='tab-content'>")?;
            self.open("<table>")?;
            self.rows(objects)?;
            self.close("</table>")?;
            self.close("</div>")?;
            self.close("</div>")
        } else {
            self.open(format!("<div id='object-{id}'{flags}>"))?;
            self.open("<table>")?;
            self.rows(objects)?;
            self.close("</table>")?;
            self.close("</div>")
        }
    }

    fn visit_enum(&mut self, opt: &NumericOptionRecord, values: &mut Children<'_, '_>) -> Result<()> {
        self.nested(&opt.header)?;
        let id = opt.object_id;

        self.label_cell(*id, &opt.ui_name.value)?;
        self.open("<td class='ui-input'>")?;
        self.open(format!(
            "<select id='object-{id}' name='{}'{}>",
            escape(&opt.opt_name.value),
            flag_attrs(opt.flags)
        ))?;
        self.enum_default = Some(opt.default_value);
        values.walk(self)?;
        self.enum_default = None;
        self.close("</select>")?;
        self.close("</td>")?;
        self.helptext_cell(opt.helptext())
    }

    fn visit_enum_value(&mut self, val: &EnumValueRecord) -> Result<()> {
        let selected = if self.enum_default == Some(val.value) {
            " selected"
        } else {
            ""
        };
        self.line(format!(
            "<option value='{}'{selected}>{}</option>",
            val.value,
            escape(&val.ui_name.value)
        ))
    }

    fn visit_number(&mut self, opt: &NumericOptionRecord) -> Result<()> {
        self.nested(&opt.header)?;
        let id = opt.object_id;

        self.label_cell(*id, &opt.ui_name.value)?;
        self.input_cell(format!(
            "<input type='number' id='object-{id}' name='{}' value='{}'{}>",
            escape(&opt.opt_name.value),
            opt.default_value,
            flag_attrs(opt.flags)
        ))?;
        self.helptext_cell(opt.helptext())
    }

    fn visit_bool(&mut self, opt: &NumericOptionRecord) -> Result<()> {
        self.nested(&opt.header)?;
        let id = opt.object_id;
        let checked = if opt.default_bool() { " checked" } else { "" };

        self.label_cell(*id, &opt.ui_name.value)?;
        self.input_cell(format!(
            "<input type='checkbox' id='object-{id}' name='{}'{checked}{}>",
            escape(&opt.opt_name.value),
            flag_attrs(opt.flags)
        ))?;
        self.helptext_cell(opt.helptext())
    }

    fn visit_varchar(&mut self, opt: &VarcharOptionRecord) -> Result<()> {
        self.nested(&opt.header)?;
        let id = opt.object_id;

        self.label_cell(*id, &opt.ui_name.value)?;
        self.input_cell(format!(
            "<input type='text' id='object-{id}' name='{}' value='{}'{}>",
            escape(&opt.opt_name.value),
            escape(&opt.default_value.value),
            flag_attrs(opt.flags)
        ))?;
        self.helptext_cell(opt.helptext())
    }

    fn visit_comment(&mut self, comment: &CommentRecord) -> Result<()> {
        self.nested(&comment.header)?;

        self.cell(
            "<td class='ui-name' colspan='2'>",
            format!(
                "<span id='object-{}'{}>{}</span>",
                comment.object_id,
                flag_attrs(comment.flags),
                escape(&comment.ui_name.value)
            ),
        )?;
        self.helptext_cell(comment.helptext())
    }

    fn visit_unknown(&mut self, header: &RecordHeader) -> Result<()> {
        log::debug!("Not rendering {} at {:#x}", header.tag, header.offset);
        Ok(())
    }
}
