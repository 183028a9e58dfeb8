use anyhow::Result;
use cfr_types::decoder::{
    decode, Children, EnumValueRecord, FormRecord, NumericOptionRecord, Visitor,
};
use cfr_types::encoder::encode;
use cfr_types::format::OptionFlags;
use cfr_types::model::{
    BoolOption, EnumOption, EnumValue, Form, ObjectId, SetupMenuRoot, SmObject,
};

fn single_form(objects: Vec<SmObject>) -> SetupMenuRoot {
    SetupMenuRoot {
        forms: vec![Form {
            object_id: ObjectId::from(100),
            flags: OptionFlags::NONE,
            ui_name: String::from("Main"),
            objects,
        }],
    }
}

/// A single bool with empty help text.
pub fn bool_with_empty_helptext() -> Result<()> {
    #[derive(Default)]
    struct Seen {
        bools: Vec<(u32, bool, String, String)>,
    }
    impl Visitor for Seen {
        fn visit_bool(&mut self, opt: &NumericOptionRecord) -> Result<()> {
            self.bools.push((
                *opt.object_id,
                opt.default_bool(),
                opt.ui_name.value.clone(),
                opt.helptext().to_owned(),
            ));
            Ok(())
        }
    }

    let menu = single_form(vec![BoolOption {
        object_id: ObjectId::from(1),
        flags: OptionFlags::NONE,
        opt_name: String::from("c_states"),
        ui_name: String::from("CPU power states (C-states)"),
        ui_helptext: Some(String::new()),
        default_value: true,
    }
    .into()]);

    let mut seen = Seen::default();
    decode(&encode(&menu)?, &mut seen)?;
    assert_eq!(
        vec![(
            1,
            true,
            String::from("CPU power states (C-states)"),
            String::new()
        )],
        seen.bools
    );
    Ok(())
}

/// An enum's values arrive in order, once each.
pub fn enum_values_in_order() -> Result<()> {
    #[derive(Default)]
    struct Seen {
        values: Vec<(u32, String)>,
    }
    impl Visitor for Seen {
        fn visit_enum_value(&mut self, val: &EnumValueRecord) -> Result<()> {
            self.values.push((val.value, val.ui_name.value.clone()));
            Ok(())
        }
    }

    let menu = single_form(vec![EnumOption {
        object_id: ObjectId::from(1),
        flags: OptionFlags::NONE,
        opt_name: String::from("power_on_after_fail"),
        ui_name: String::from("Restore AC Power Loss"),
        ui_helptext: None,
        default_value: 1,
        values: vec![
            EnumValue::new("Power off (S5)", 0),
            EnumValue::new("Power on (S0)", 1),
            EnumValue::new("Previous state", 2),
        ],
    }
    .into()]);

    let mut seen = Seen::default();
    decode(&encode(&menu)?, &mut seen)?;
    assert_eq!(
        vec![
            (0, String::from("Power off (S5)")),
            (1, String::from("Power on (S0)")),
            (2, String::from("Previous state")),
        ],
        seen.values
    );
    Ok(())
}

/// A sub-form is visited, children and all, before the siblings that follow it.
pub fn sub_form_before_siblings() -> Result<()> {
    #[derive(Default)]
    struct Seen {
        events: Vec<String>,
    }
    impl Visitor for Seen {
        fn visit_form(&mut self, form: &FormRecord, objects: &mut Children<'_, '_>) -> Result<()> {
            self.events.push(format!("enter {}", form.ui_name.value));
            objects.walk(self)?;
            self.events.push(format!("leave {}", form.ui_name.value));
            Ok(())
        }
        fn visit_bool(&mut self, opt: &NumericOptionRecord) -> Result<()> {
            self.events.push(opt.opt_name.value.clone());
            Ok(())
        }
    }

    let bool_opt = |id: u32, name: &str| -> SmObject {
        BoolOption {
            object_id: ObjectId::from(id),
            flags: OptionFlags::NONE,
            opt_name: String::from(name),
            ui_name: String::from(name),
            ui_helptext: None,
            default_value: false,
        }
        .into()
    };
    let inner = Form {
        object_id: ObjectId::from(2),
        flags: OptionFlags::NONE,
        ui_name: String::from("Inner"),
        objects: vec![bool_opt(3, "inside")],
    };
    let menu = single_form(vec![
        bool_opt(1, "before"),
        inner.into(),
        bool_opt(4, "after"),
    ]);

    let mut seen = Seen::default();
    decode(&encode(&menu)?, &mut seen)?;
    assert_eq!(
        vec![
            "enter Main",
            "before",
            "enter Inner",
            "inside",
            "leave Inner",
            "after",
            "leave Main",
        ],
        seen.events
    );
    Ok(())
}
