use anyhow::{Context, Result};
use cfr_render::HtmlRenderer;
use cfr_tools::cli::{self, DecodeArgs};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Renders a CFR blob as an HTML form.
#[derive(Parser, Debug)]
#[command(name = "cfr_to_html")]
struct Cli {
    /// CFR blob to read
    input: PathBuf,

    /// Where to write the HTML [default: stdout]
    output: Option<PathBuf>,

    #[command(flatten)]
    decode: DecodeArgs,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logger(&cli.verbose);
    let opts = cli.decode.decode_options()?;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => {
            Box::new(File::create(path).with_context(|| format!("create {path:?}"))?)
        }
        None => Box::new(io::stdout().lock()),
    };

    let mut renderer = HtmlRenderer::new(BufWriter::new(out));
    cli::decode_file(&cli.input, opts, &mut renderer)?;
    renderer.into_inner().flush()?;

    Ok(())
}
