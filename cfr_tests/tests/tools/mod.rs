use crate::helpers::tree_collector::{normalize, TreeCollector};
use crate::helpers::{put_u32, u32_at};
use anyhow::Result;
use cfr_render::{write_c_array, DebugPrinter, HtmlRenderer};
use cfr_tools::cli::decode_file;
use cfr_tools::sample_menu::{board_setup_menu, board_setup_menu_for, BoardStraps};
use cfr_types::decoder::{decode, ChecksumPolicy, DecodeOptions, PassThrough};
use cfr_types::encoder::encode;
use cfr_types::format::ROOT_CHECKSUM_OFFSET;
use cfr_types::io_utils::{load_blob, save_blob};
use cfr_types::CfrError;
use rand::distributions::{Alphanumeric, DistString};
use std::fs;
use std::path::PathBuf;

fn scratch_path(stem: &str) -> PathBuf {
    let suffix = Alphanumeric.sample_string(&mut rand::thread_rng(), 8);
    std::env::temp_dir().join(format!("cfr_tests_{stem}_{suffix}.bin"))
}

/// The board menu survives a trip through a file, for every strap combination.
pub fn sample_menu_through_a_file() -> Result<()> {
    let path = scratch_path("sample_menu");

    for (rt_perf, profile_ok) in [(false, false), (false, true), (true, false), (true, true)] {
        let menu = board_setup_menu_for(BoardStraps {
            rt_perf,
            profile_ok,
        });
        save_blob(&path, &encode(&menu)?)?;

        let blob = load_blob(&path)?;
        let mut collector = TreeCollector::default();
        decode(&blob, &mut collector)?;
        assert_eq!(normalize(&menu), collector.root);
    }

    fs::remove_file(&path)?;
    Ok(())
}

pub fn render_sample_menu() -> Result<()> {
    let blob = encode(&board_setup_menu())?;

    let mut printer = DebugPrinter::new(vec![]);
    decode(&blob, &mut printer)?;
    let dump = String::from_utf8(printer.into_inner())?;
    assert!(dump.contains("\"serialnumber\""));
    assert!(dump.contains("WARNING: Profile code is invalid"));
    assert_eq!(
        Some(format!("size:    {}", blob.len()).as_str()),
        dump.lines().rev().nth(1)
    );
    assert_eq!(Some("depth:   0"), dump.lines().last());

    let mut renderer = HtmlRenderer::new(vec![]);
    decode(&blob, &mut renderer)?;
    let html = String::from_utf8(renderer.into_inner())?;
    assert!(html.contains("<select id='object-7' name='pch_pcie_pll_ssc'>"));
    assert!(html.contains("<option value='255' selected>Auto</option>"));
    assert!(html.contains("<option value='19'>1.9%</option>"));
    assert_eq!(Some("</html>"), html.lines().last());

    let mut c_array = vec![];
    write_c_array(&mut c_array, &blob)?;
    let c_array = String::from_utf8(c_array)?;
    assert_eq!(blob.len().div_ceil(16) + 2, c_array.lines().count());
    Ok(())
}

/// A file whose checksum went stale decodes only under the advisory policy.
pub fn checksum_policy_on_files() -> Result<()> {
    let path = scratch_path("stale_checksum");
    let mut blob = encode(&board_setup_menu())?;
    let stored = u32_at(&blob, ROOT_CHECKSUM_OFFSET);
    put_u32(&mut blob, ROOT_CHECKSUM_OFFSET, !stored);
    save_blob(&path, &blob)?;

    let strict = DecodeOptions {
        checksum_policy: ChecksumPolicy::Strict,
    };
    let err = decode_file(&path, strict, &mut PassThrough).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CfrError>(),
        Some(CfrError::ChecksumMismatch { computed, .. }) if *computed == stored
    ));

    let advisory = DecodeOptions {
        checksum_policy: ChecksumPolicy::Advisory,
    };
    let mut collector = TreeCollector::default();
    decode_file(&path, advisory, &mut collector)?;
    assert_eq!(normalize(&board_setup_menu()), collector.root);

    fs::remove_file(&path)?;
    Ok(())
}
