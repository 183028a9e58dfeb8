use crate::format::{Tag, TagInt, HEADER_LEN};
use crate::CfrError;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

/// Reads one root record from `r`: its header first, then exactly as many bytes as it declares.
///
/// Anything after the root is left unread. The contents are not validated here; that is the decoder's job.
pub fn read_blob<R: Read + Seek>(mut r: R) -> Result<Vec<u8>> {
    let start = r.stream_position().context("reading record")?;

    let mut header = [0u8; HEADER_LEN];
    r.read_exact(&mut header).context("reading record")?;
    let [t0, t1, t2, t3, s0, s1, s2, s3] = header;
    let tag = TagInt::from(u32::from_le_bytes([t0, t1, t2, t3]));
    let size = u32::from_le_bytes([s0, s1, s2, s3]);
    if tag != TagInt::from(Tag::Root) {
        return Err(CfrError::NotARoot { actual: tag }.into());
    }

    // The header is untrusted, so the buffer grows with what the source actually holds.
    r.seek(SeekFrom::Start(start)).context("reading data")?;
    let mut buf = vec![];
    r.by_ref()
        .take(u64::from(size))
        .read_to_end(&mut buf)
        .context("reading data")?;
    if buf.len() != size as usize {
        let short = io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("got {} of {size} bytes", buf.len()),
        );
        return Err(short).context("reading data");
    }
    log::debug!("Read a {size} byte CFR root");
    Ok(buf)
}

pub fn load_blob<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {path:?}"))?;
    read_blob(file).with_context(|| format!("load {path:?}"))
}

pub fn save_blob<P: AsRef<Path>>(path: P, blob: &[u8]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, blob).with_context(|| format!("write {path:?}"))
}
