use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::Result;

/// Writes `bytes` to `path` in one go, replacing any existing file.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    info!("wrote {} bytes to {}", bytes.len(), path.display());
    debug!("{}:\n{}", path.display(), format_hex_dump(bytes));
    Ok(())
}

const BYTES_PER_LINE: usize = 16;

/// Hex lines of 16 bytes, each prefixed with its offset.
pub(crate) fn format_hex_dump(data: &[u8]) -> String {
    data.chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(line, chunk)| {
            let hex: Vec<String> = chunk.iter().map(|byte| format!("{byte:02x}")).collect();
            format!("{:08x}  {}\n", line * BYTES_PER_LINE, hex.join(" "))
        })
        .collect()
}
