use anyhow::{Context, Result};
use cfr_types::decoder::{decode_with, ChecksumPolicy, DecodeOptions, Visitor};
use cfr_types::io_utils;
use clap::{Args, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::env;
use std::io::Write;
use std::path::Path;

pub const ENV_VAR_CHECKSUM_POLICY: &str = "CFR_CHECKSUM_POLICY";

#[derive(ValueEnum, PartialEq, Eq, Clone, Copy, Debug)]
pub enum ChecksumPolicyArg {
    /// Refuse blobs whose checksum does not match
    Strict,
    /// Warn about a wrong checksum, then decode anyway
    Advisory,
}
impl From<ChecksumPolicyArg> for ChecksumPolicy {
    fn from(arg: ChecksumPolicyArg) -> Self {
        match arg {
            ChecksumPolicyArg::Strict => ChecksumPolicy::Strict,
            ChecksumPolicyArg::Advisory => ChecksumPolicy::Advisory,
        }
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// What to do when the stored checksum is wrong [default: $CFR_CHECKSUM_POLICY, else strict]
    #[arg(long, value_enum)]
    pub checksum_policy: Option<ChecksumPolicyArg>,
}

impl DecodeArgs {
    pub fn decode_options(&self) -> Result<DecodeOptions> {
        let from_env = env::var(ENV_VAR_CHECKSUM_POLICY).ok();
        let checksum_policy = resolve_checksum_policy(self.checksum_policy, from_env.as_deref())?;
        log::debug!("Checksum policy: {checksum_policy:?}");
        Ok(DecodeOptions { checksum_policy })
    }
}

/// The flag wins over the environment, which wins over the library default.
pub fn resolve_checksum_policy(
    arg: Option<ChecksumPolicyArg>,
    from_env: Option<&str>,
) -> Result<ChecksumPolicy> {
    match (arg, from_env) {
        (Some(arg), _) => Ok(arg.into()),
        (None, Some(s)) => s
            .parse()
            .with_context(|| format!("parsing ${ENV_VAR_CHECKSUM_POLICY}")),
        (None, None) => Ok(ChecksumPolicy::default()),
    }
}

/// Logs go to stderr, leaving stdout to the tool's own output.
pub fn init_logger(verbose: &Verbosity<WarnLevel>) {
    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .filter_level(verbose.log_level_filter())
        .target(env_logger::fmt::Target::Stderr)
        .init();
}

pub fn decode_file<P, V>(path: P, opts: DecodeOptions, visitor: &mut V) -> Result<()>
where
    P: AsRef<Path>,
    V: Visitor,
{
    let path = path.as_ref();
    let blob = io_utils::load_blob(path)?;
    decode_with(&blob, opts, visitor).with_context(|| format!("decode {path:?}"))
}
