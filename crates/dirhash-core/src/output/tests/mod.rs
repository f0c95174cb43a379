#![allow(clippy::unwrap_used)]


use chrono::{TimeZone, Utc};

use crate::algorithm::HashAlgorithm;
use crate::scanner::FileRecord;

pub(super) const HELLO_MD5: &str = "5eb63bbbe01eeed093cb22bb8f5acdc3";
pub(super) const HELLO_SHA256: &str =
    "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
pub(super) const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// Two hashed files plus one that never got digests
pub(super) fn sample_records() -> Vec<FileRecord> {
    let modified = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let mut hello = FileRecord::new("/data/hello.txt", 11, modified);
    hello.digests.insert(HashAlgorithm::Md5, HELLO_MD5.to_string());
    hello
        .digests
        .insert(HashAlgorithm::Sha256, HELLO_SHA256.to_string());

    let mut empty = FileRecord::new("/data/empty.bin", 0, modified);
    empty.digests.insert(HashAlgorithm::Md5, EMPTY_MD5.to_string());

    let unhashed = FileRecord::new("/data/locked.db", 7, modified);

    vec![hello, empty, unhashed]
}
