//! A demonstration setup menu, modelled on a real mainboard.

use cfr_types::format::OptionFlags;
use cfr_types::model::{
    BoolOption, CommentOption, EnumOption, EnumValue, Form, NumberOption, ObjectIdGenerator,
    SetupMenuRoot, SmObject, VarcharOption,
};

const NUM_PCIE_SSC_SETTINGS: u32 = 20;

/// Board state that decides which options are shown, and their defaults.
#[derive(Clone, Copy, Debug)]
pub struct BoardStraps {
    /// A real-time performance profile, which hides the power saving knobs.
    pub rt_perf: bool,
    /// Whether the EEPROM profile code is valid. If it is, the warning about it is suppressed.
    pub profile_ok: bool,
}
impl Default for BoardStraps {
    fn default() -> Self {
        Self {
            rt_perf: false,
            profile_ok: true,
        }
    }
}

pub fn board_setup_menu() -> SetupMenuRoot {
    board_setup_menu_for(BoardStraps::default())
}

pub fn board_setup_menu_for(straps: BoardStraps) -> SetupMenuRoot {
    let BoardStraps {
        rt_perf,
        profile_ok,
    } = straps;
    let perf_suppress = if rt_perf {
        OptionFlags::SUPPRESS
    } else {
        OptionFlags::NONE
    };

    let mut ids = ObjectIdGenerator::new();

    let serial_number = VarcharOption {
        object_id: ids.next_id(),
        flags: OptionFlags::READONLY | OptionFlags::VOLATILE,
        opt_name: String::from("serial_number"),
        ui_name: String::from("Serial Number"),
        ui_helptext: None,
        default_value: String::from("serialnumber"),
    };
    let part_number = VarcharOption {
        object_id: ids.next_id(),
        flags: OptionFlags::READONLY | OptionFlags::VOLATILE,
        opt_name: String::from("part_number"),
        ui_name: String::from("Part Number"),
        ui_helptext: None,
        default_value: String::from("partnumber"),
    };
    let bad_profile = CommentOption {
        object_id: ids.next_id(),
        flags: if profile_ok {
            OptionFlags::READONLY | OptionFlags::SUPPRESS
        } else {
            OptionFlags::READONLY
        },
        ui_name: String::from("WARNING: Profile code is invalid"),
        ui_helptext: None,
    };
    let profile = NumberOption {
        object_id: ids.next_id(),
        flags: OptionFlags::READONLY | OptionFlags::VOLATILE,
        opt_name: String::from("profile"),
        ui_name: String::from("Profile code"),
        ui_helptext: Some(String::from("The profile code obtained from the EEPROM")),
        default_value: 42,
    };

    let power_on_after_fail = EnumOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("power_on_after_fail"),
        ui_name: String::from("Restore AC Power Loss"),
        ui_helptext: Some(String::from(
            "Specify what to do when power is re-applied after a power loss. \
             This option has no effect on systems without a RTC battery.",
        )),
        default_value: 0,
        // Restoring the previous power state is not supported.
        values: vec![
            EnumValue::new("Power off (S5)", 0),
            EnumValue::new("Power on (S0)", 1),
        ],
    };
    let primary_display = EnumOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("primary_display"),
        ui_name: String::from("Primary display device"),
        ui_helptext: Some(String::from(
            "Specify which display device to use as primary.",
        )),
        default_value: 3,
        values: vec![
            EnumValue::new("Intel iGPU", 0),
            EnumValue::new("CPU PEG dGPU", 1),
            EnumValue::new("PCH PCIe dGPU", 2),
            EnumValue::new("Auto", 3),
        ],
    };
    let pch_pcie_pll_ssc = EnumOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("pch_pcie_pll_ssc"),
        ui_name: String::from("PCH PCIe PLL Spread Spectrum Clocking"),
        ui_helptext: None,
        default_value: 0xff,
        values: (0..NUM_PCIE_SSC_SETTINGS)
            .map(|i| EnumValue::new(format!("{}.{}%", i / 10, i % 10), i))
            .chain([EnumValue::new("Auto", 0xff)])
            .collect(),
    };

    let processor_id = ids.next_id();
    let pkg_c_state_limit = EnumOption {
        object_id: ids.next_id(),
        flags: perf_suppress,
        opt_name: String::from("pkg_c_state_limit"),
        ui_name: String::from("Package C-state limit"),
        ui_helptext: None,
        default_value: if rt_perf { 0 } else { 255 },
        values: vec![
            EnumValue::new("C0/C1", 0),
            EnumValue::new("C2", 1),
            EnumValue::new("C3", 2),
            EnumValue::new("C6", 3),
            EnumValue::new("C7", 4),
            EnumValue::new("C7S", 5),
            EnumValue::new("C8", 6),
            EnumValue::new("C9", 7),
            EnumValue::new("C10", 8),
            EnumValue::new("Default", 254),
            EnumValue::new("Auto", 255),
        ],
    };
    let c_states = BoolOption {
        object_id: ids.next_id(),
        flags: perf_suppress,
        opt_name: String::from("c_states"),
        ui_name: String::from("CPU power states (C-states)"),
        ui_helptext: Some(String::from("Specify whether C-states are supported.")),
        default_value: !rt_perf,
    };
    let hyper_threading = BoolOption {
        object_id: ids.next_id(),
        flags: perf_suppress,
        opt_name: String::from("hyper_threading"),
        ui_name: String::from("Hyper-Threading Technology"),
        ui_helptext: None,
        default_value: !rt_perf,
    };
    let turbo_mode = BoolOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("turbo_mode"),
        ui_name: String::from("Turbo Boost"),
        ui_helptext: None,
        default_value: true,
    };
    let energy_eff_turbo = BoolOption {
        object_id: ids.next_id(),
        flags: perf_suppress,
        opt_name: String::from("energy_eff_turbo"),
        ui_name: String::from("Energy Efficient Turbo"),
        ui_helptext: None,
        default_value: false,
    };
    let vmx = BoolOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("vmx"),
        ui_name: String::from("Intel Virtualization Technology (VT-x)"),
        ui_helptext: None,
        default_value: false,
    };
    let vtd = BoolOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("vtd"),
        ui_name: String::from("Intel Virtualization Technology for Directed I/O (VT-d)"),
        ui_helptext: None,
        default_value: false,
    };
    let processor = Form {
        object_id: processor_id,
        flags: OptionFlags::NONE,
        ui_name: String::from("Processor"),
        objects: vec![
            pkg_c_state_limit.into(),
            c_states.into(),
            hyper_threading.into(),
            turbo_mode.into(),
            energy_eff_turbo.into(),
            vmx.into(),
            vtd.into(),
        ],
    };

    let ibecc = BoolOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("ibecc"),
        ui_name: String::from("In-Band ECC"),
        ui_helptext: Some(String::from(
            "Specify whether In-Band error checking and correction is to be enabled. \
             Enabling this option will reduce the amount of available RAM \
             because some memory is needed to store ECC codes.",
        )),
        default_value: false,
    };
    // TODO: Help texts for these two, once their exact effect on the SoC is documented.
    let llc_dead_line = BoolOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("llc_dead_line"),
        ui_name: String::from("LLC Dead Line Allocation"),
        ui_helptext: None,
        default_value: false,
    };
    let pcie_sris = BoolOption {
        object_id: ids.next_id(),
        flags: OptionFlags::NONE,
        opt_name: String::from("pcie_sris"),
        ui_name: String::from("PCIe Separate Reference Clock with Independent SSC"),
        ui_helptext: None,
        default_value: false,
    };

    let main_contents: Vec<SmObject> = vec![
        serial_number.into(),
        part_number.into(),
        bad_profile.into(),
        profile.into(),
        power_on_after_fail.into(),
        primary_display.into(),
        pch_pcie_pll_ssc.into(),
        processor.into(),
        ibecc.into(),
        llc_dead_line.into(),
        pcie_sris.into(),
    ];

    SetupMenuRoot {
        forms: vec![Form {
            object_id: ids.next_id(),
            flags: OptionFlags::NONE,
            ui_name: String::from("Main"),
            objects: main_contents,
        }],
    }
}
