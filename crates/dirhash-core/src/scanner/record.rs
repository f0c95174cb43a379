//! File metadata and computed digests

use std::collections::BTreeMap;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;

/// Hex digests keyed by algorithm, iterated in canonical order
pub type Digests = BTreeMap<HashAlgorithm, String>;

/// A discovered regular file and the digests computed for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base filename without directory path
    #[serde(rename = "filename")]
    pub name: String,
    /// Full filesystem path, as found during enumeration
    pub path: PathBuf,
    /// Size in bytes at enumeration time
    pub size: u64,
    /// Last modification time
    #[serde(rename = "mod_time")]
    pub modified: DateTime<Utc>,
    /// Lowercase hex digests, empty until hashed
    #[serde(rename = "hashes")]
    pub digests: Digests,
}

impl FileRecord {
    /// Create a record with no digests
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64, modified: DateTime<Utc>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path,
            size,
            modified,
            digests: Digests::new(),
        }
    }

    /// Create a record from filesystem metadata
    ///
    /// Falls back to the Unix epoch when the platform has no mtime.
    #[must_use]
    pub fn from_metadata(path: impl Into<PathBuf>, metadata: &Metadata) -> Self {
        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self::new(path, metadata.len(), modified)
    }

    /// Path as a borrowed [`Path`]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Digest for one algorithm, if computed
    #[must_use]
    pub fn digest(&self, algorithm: HashAlgorithm) -> Option<&str> {
        self.digests.get(&algorithm).map(String::as_str)
    }

    /// Whether any digest has been recorded
    #[must_use]
    pub fn is_hashed(&self) -> bool {
        !self.digests.is_empty()
    }
}
