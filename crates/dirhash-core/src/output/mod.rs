//! Output module: Report rendering
//!
//! Renders hashed file records as CSV (three schemas), JSON, or an aligned
//! terminal table. Callers pass records already sorted the way they want
//! them printed.

mod csv_report;
mod format;
mod table;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::scanner::FileRecord;

pub use format::OutputFormat;
pub use table::render_table;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write a report in the given format to any writer
///
/// # Errors
/// Returns an error if serialization or the underlying writer fails.
pub fn write_report<W: Write>(
    files: &[FileRecord],
    format: OutputFormat,
    writer: W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Standard => csv_report::write_standard(files, writer),
        OutputFormat::Condensed => csv_report::write_condensed(files, writer),
        OutputFormat::Ioc => csv_report::write_ioc(files, writer),
        OutputFormat::Json => write_json(files, writer),
    }
}

/// Create (or truncate) `path` and write a report into it
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_report_file(
    files: &[FileRecord],
    format: OutputFormat,
    path: &Path,
) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_report(files, format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(files: &[FileRecord], mut writer: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, files)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests;
