use anyhow::Result;
use cfr_render::write_c_array;
use cfr_tools::cli;
use cfr_tools::sample_menu::board_setup_menu;
use cfr_types::encoder::encode;
use cfr_types::io_utils::save_blob;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io;
use std::path::PathBuf;

/// Encodes the demonstration board menu.
#[derive(Parser, Debug)]
#[command(name = "cfr_write")]
struct Cli {
    /// Where to save the blob [default: print it to stdout as a C array]
    output: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logger(&cli.verbose);

    let blob = encode(&board_setup_menu())?;
    log::info!("Encoded the board menu into {} bytes", blob.len());

    match &cli.output {
        Some(path) => {
            println!("Saving to {path:?}");
            save_blob(path, &blob)
        }
        None => write_c_array(io::stdout().lock(), &blob),
    }
}
