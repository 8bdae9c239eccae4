/// Flood event table writer.
///
/// The canonical output is a semicolon-delimited text table with one header
/// row — `regine;main;date;flood;threshold` — one row per independent flood
/// event, all stations concatenated. Downstream consumers parse this layout
/// as-is, so the column set and order are fixed.
///
/// A JSON export of the same records is available for callers that prefer
/// structured input over the legacy table.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::model::FloodEvent;

/// Header row of the event table.
pub const TABLE_HEADER: &str = "regine;main;date;flood;threshold";

/// Writes the semicolon-delimited event table.
pub fn write_table<W: Write>(mut writer: W, events: &[FloodEvent]) -> io::Result<()> {
    writeln!(writer, "{TABLE_HEADER}")?;
    for event in events {
        writeln!(
            writer,
            "{};{};{};{};{}",
            event.region,
            event.sequence,
            event.date.format("%Y-%m-%d"),
            event.value,
            event.threshold
        )?;
    }
    Ok(())
}

/// Writes the event table to a file, creating or truncating it.
pub fn write_table_file(path: &Path, events: &[FloodEvent]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_table(&mut writer, events)?;
    writer.flush()
}

/// Writes the events as a pretty-printed JSON array.
pub fn write_json<W: Write>(writer: W, events: &[FloodEvent]) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, events)?;
    Ok(())
}

/// Writes the JSON export to a file, creating or truncating it.
pub fn write_json_file(path: &Path, events: &[FloodEvent]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, events)?;
    writeln!(writer)?;
    writer.flush()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
