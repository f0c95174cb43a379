//! Column-aligned terminal rendering

use std::fmt::Write;

use super::OutputFormat;
use crate::algorithm::HashAlgorithm;
use crate::scanner::FileRecord;

const EMPTY_MESSAGE: &str = "No files to display";
const NOT_AVAILABLE: &str = "N/A";
const COLUMN_GAP: usize = 1;

/// Render files as an aligned text table
///
/// Every column except the last is padded to its widest cell plus one
/// space. `Json` renders the same way as `Standard`.
#[must_use]
pub fn render_table(files: &[FileRecord], format: OutputFormat) -> String {
    if files.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let rows = match format {
        OutputFormat::Standard | OutputFormat::Json => standard_rows(files),
        OutputFormat::Condensed => condensed_rows(files),
        OutputFormat::Ioc => ioc_rows(files),
    };
    align(&rows)
}

fn leading_cells(file: &FileRecord) -> Vec<String> {
    vec![
        file.name.clone(),
        file.path.display().to_string(),
        file.size.to_string(),
    ]
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(ToString::to_string).collect()
}

fn standard_rows(files: &[FileRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![header(&["File Name", "Path", "Size", "Hash", "Hash Type"])];
    for file in files {
        if file.digests.is_empty() {
            let mut row = leading_cells(file);
            row.extend([NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()]);
            rows.push(row);
            continue;
        }
        for (alg, digest) in &file.digests {
            let mut row = leading_cells(file);
            row.extend([digest.clone(), alg.name().to_string()]);
            rows.push(row);
        }
    }
    rows
}

fn condensed_rows(files: &[FileRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![header(&["File Name", "Path", "Size", "Hashes"])];
    for file in files {
        let hashes = if file.digests.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            file.digests
                .iter()
                .map(|(alg, digest)| format!("{alg}:{digest}"))
                .collect::<Vec<_>>()
                .join(" | ")
        };
        let mut row = leading_cells(file);
        row.push(hashes);
        rows.push(row);
    }
    rows
}

fn ioc_rows(files: &[FileRecord]) -> Vec<Vec<String>> {
    let mut columns = vec!["File Name".to_string(), "Path".to_string(), "Size".to_string()];
    columns.extend(HashAlgorithm::ALL.iter().map(|alg| alg.name().to_uppercase()));

    let mut rows = vec![columns];
    for file in files {
        let mut row = leading_cells(file);
        row.extend(
            HashAlgorithm::ALL
                .iter()
                .map(|&alg| file.digest(alg).unwrap_or_default().to_string()),
        );
        rows.push(row);
    }
    rows
}

fn align(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        let last = row.len().saturating_sub(1);
        for (i, cell) in row.iter().enumerate() {
            if i == last {
                line.push_str(cell);
            } else {
                let _ = write!(line, "{cell:<width$}", width = widths[i] + COLUMN_GAP);
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
