//! Record persistence: JSON lines for crawl output, pretty arrays for offline dedupe.

use crate::error::{CoreError, Result};
use scopecrawl_scanner::PageRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Create or truncate the output file before a crawl starts.
pub fn prepare_output(path: &Path) -> Result<()> {
    File::create(path).map_err(|e| CoreError::io(path, e))?;
    info!("Cleared output file: {}", path.display());
    Ok(())
}

/// One compact JSON object per line, each line newline-terminated.
pub fn to_json_lines(records: &[PageRecord]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

/// Rewrite `path` with the given records as JSON lines.
pub fn write_records(path: &Path, records: &[PageRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| CoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n").map_err(|e| CoreError::io(path, e))?;
    }
    writer.flush().map_err(|e| CoreError::io(path, e))?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Rewrite `path` with the given records as a single indented JSON array.
pub fn write_json_array(path: &Path, records: &[PageRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| CoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n").map_err(|e| CoreError::io(path, e))?;
    writer.flush().map_err(|e| CoreError::io(path, e))?;
    Ok(())
}
