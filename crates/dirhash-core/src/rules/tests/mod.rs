#![allow(clippy::unwrap_used)]

mod tests_text;

use chrono::Utc;

use crate::algorithm::HashAlgorithm;
use crate::scanner::FileRecord;

pub(super) const MD5_A: &str = "5eb63bbbe01eeed093cb22bb8f5acdc3";
pub(super) const SHA256_A: &str =
    "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
pub(super) const MD5_B: &str = "d41d8cd98f00b204e9800998ecf8427e";

pub(super) fn record(path: &str, digests: &[(HashAlgorithm, &str)]) -> FileRecord {
    let mut record = FileRecord::new(path, 0, Utc::now());
    for (alg, digest) in digests {
        record.digests.insert(*alg, (*digest).to_string());
    }
    record
}

/// `malware.exe` with md5+sha256 and `readme.txt` with md5
pub(super) fn sample_files() -> Vec<FileRecord> {
    vec![
        record(
            "/samples/malware.exe",
            &[(HashAlgorithm::Md5, MD5_A), (HashAlgorithm::Sha256, SHA256_A)],
        ),
        record("/samples/readme.txt", &[(HashAlgorithm::Md5, MD5_B)]),
    ]
}
