//! Shared plumbing for the `cfr_read`, `cfr_to_html` and `cfr_write` binaries.

pub mod cli;
pub mod sample_menu;
