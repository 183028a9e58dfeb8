use cfr_types::format::OptionFlags;
use cfr_types::model::{
    BoolOption, CommentOption, EnumOption, EnumValue, Form, NumberOption, ObjectIdGenerator,
    SetupMenuRoot, SmObject, VarcharOption,
};
use rand::distributions::{Alphanumeric, DistString};
use rand::seq::SliceRandom;
use rand::Rng;

const MAX_FORM_DEPTH: usize = 3;
const WORDS: [&str; 8] = ["CPU", "Größe", "<b>", "a & b", "it's", "\"q\"", "€", " "];

pub fn random_text<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(1..24);
    let mut text = Alphanumeric.sample_string(rng, len);
    if rng.gen_bool(0.3) {
        text.push_str(WORDS.choose(rng).unwrap());
    }
    text
}

fn random_helptext<R: Rng>(rng: &mut R) -> Option<String> {
    match rng.gen_range(0..3) {
        0 => None,
        1 => Some(String::new()),
        _ => Some(random_text(rng)),
    }
}

fn random_flags<R: Rng>(rng: &mut R) -> OptionFlags {
    OptionFlags::from(rng.gen_range(0..16))
}

pub fn random_object<R: Rng>(rng: &mut R, ids: &mut ObjectIdGenerator, depth: usize) -> SmObject {
    let kinds = if depth < MAX_FORM_DEPTH { 6 } else { 5 };
    match rng.gen_range(0..kinds) {
        0 => EnumOption {
            object_id: ids.next_id(),
            flags: random_flags(rng),
            opt_name: random_text(rng),
            ui_name: random_text(rng),
            ui_helptext: random_helptext(rng),
            default_value: rng.gen(),
            values: (0..rng.gen_range(0..6))
                .map(|_| EnumValue::new(random_text(rng), rng.gen()))
                .collect(),
        }
        .into(),
        1 => NumberOption {
            object_id: ids.next_id(),
            flags: random_flags(rng),
            opt_name: random_text(rng),
            ui_name: random_text(rng),
            ui_helptext: random_helptext(rng),
            default_value: rng.gen(),
        }
        .into(),
        2 => BoolOption {
            object_id: ids.next_id(),
            flags: random_flags(rng),
            opt_name: random_text(rng),
            ui_name: random_text(rng),
            ui_helptext: random_helptext(rng),
            default_value: rng.gen(),
        }
        .into(),
        3 => VarcharOption {
            object_id: ids.next_id(),
            flags: random_flags(rng),
            opt_name: random_text(rng),
            ui_name: random_text(rng),
            ui_helptext: random_helptext(rng),
            default_value: random_text(rng),
        }
        .into(),
        4 => CommentOption {
            object_id: ids.next_id(),
            flags: random_flags(rng),
            ui_name: random_text(rng),
            ui_helptext: random_helptext(rng),
        }
        .into(),
        _ => random_form(rng, ids, depth + 1).into(),
    }
}

pub fn random_form<R: Rng>(rng: &mut R, ids: &mut ObjectIdGenerator, depth: usize) -> Form {
    let object_id = ids.next_id();
    Form {
        object_id,
        flags: random_flags(rng),
        ui_name: random_text(rng),
        objects: (0..rng.gen_range(0..6))
            .map(|_| random_object(rng, ids, depth))
            .collect(),
    }
}

pub fn random_menu<R: Rng>(rng: &mut R) -> SetupMenuRoot {
    let mut ids = ObjectIdGenerator::new();
    SetupMenuRoot {
        forms: (0..rng.gen_range(0..4))
            .map(|_| random_form(rng, &mut ids, 0))
            .collect(),
    }
}
