//! CSV report schemas

use std::collections::BTreeSet;
use std::io::Write;

use csv::Writer;

use super::OutputError;
use crate::algorithm::HashAlgorithm;
use crate::scanner::FileRecord;

const NOT_AVAILABLE: &str = "N/A";

/// `Path,FileName,Size,Hash,HashType`, one row per digest
pub(super) fn write_standard<W: Write>(files: &[FileRecord], writer: W) -> Result<(), OutputError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["Path", "FileName", "Size", "Hash", "HashType"])?;

    for file in files {
        let path = file.path.display().to_string();
        let size = file.size.to_string();
        if file.digests.is_empty() {
            csv.write_record([path.as_str(), file.name.as_str(), size.as_str(), NOT_AVAILABLE, NOT_AVAILABLE])?;
            continue;
        }
        for (alg, digest) in &file.digests {
            csv.write_record([path.as_str(), file.name.as_str(), size.as_str(), digest.as_str(), alg.name()])?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// `Path,FileName,Size,<alg>...`, one row per file
///
/// The algorithm columns are the union over all files.
pub(super) fn write_condensed<W: Write>(
    files: &[FileRecord],
    writer: W,
) -> Result<(), OutputError> {
    let algorithms: BTreeSet<HashAlgorithm> = files
        .iter()
        .flat_map(|f| f.digests.keys().copied())
        .collect();

    let mut csv = Writer::from_writer(writer);
    let mut header = vec!["Path", "FileName", "Size"];
    header.extend(algorithms.iter().map(|alg| alg.name()));
    csv.write_record(&header)?;

    for file in files {
        let mut record = vec![
            file.path.display().to_string(),
            file.name.clone(),
            file.size.to_string(),
        ];
        record.extend(
            algorithms
                .iter()
                .map(|&alg| file.digest(alg).unwrap_or_default().to_string()),
        );
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// `file_path,file_name,file_size,md5,sha1,sha256,sha512`
pub(super) fn write_ioc<W: Write>(files: &[FileRecord], writer: W) -> Result<(), OutputError> {
    let mut csv = Writer::from_writer(writer);
    let mut header = vec!["file_path", "file_name", "file_size"];
    header.extend(HashAlgorithm::ALL.iter().map(|alg| alg.name()));
    csv.write_record(&header)?;

    for file in files {
        let mut record = vec![
            file.path.display().to_string(),
            file.name.clone(),
            file.size.to_string(),
        ];
        record.extend(
            HashAlgorithm::ALL
                .iter()
                .map(|&alg| file.digest(alg).unwrap_or_default().to_string()),
        );
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}
