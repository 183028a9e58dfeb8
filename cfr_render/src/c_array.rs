use anyhow::Result;
use std::io::Write;

const BYTES_PER_LINE: usize = 16;

/// Dumps `bytes` as a C array literal, for linking a blob straight into firmware.
pub fn write_c_array<W: Write>(mut w: W, bytes: &[u8]) -> Result<()> {
    write!(w, "static __attribute__((aligned(4))) uint8_t cfr_raw_data[] = {{")?;
    for line in bytes.chunks(BYTES_PER_LINE) {
        write!(w, "\n\t")?;
        for byte in line {
            write!(w, "0x{byte:02x}, ")?;
        }
    }
    writeln!(w, "\n}};")?;
    Ok(())
}
