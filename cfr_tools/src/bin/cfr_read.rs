use anyhow::Result;
use cfr_render::DebugPrinter;
use cfr_tools::cli::{self, DecodeArgs};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Prints the record structure of a CFR blob.
#[derive(Parser, Debug)]
#[command(name = "cfr_read")]
struct Cli {
    /// CFR blob to read
    input: PathBuf,

    #[command(flatten)]
    decode: DecodeArgs,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logger(&cli.verbose);
    let opts = cli.decode.decode_options()?;

    let mut printer = DebugPrinter::new(BufWriter::new(io::stdout().lock()));
    cli::decode_file(&cli.input, opts, &mut printer)?;
    printer.into_inner().flush()?;

    Ok(())
}
