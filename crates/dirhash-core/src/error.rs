//! Error types for hashing and enumeration

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while validating algorithms or hashing files
#[derive(Debug, Error)]
pub enum HashError {
    #[error("unsupported hash algorithm '{0}' (expected one of: md5, sha1, sha256, sha512)")]
    UnsupportedAlgorithm(String),

    #[error("no valid hash algorithms requested")]
    NoValidAlgorithms,

    #[error("failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn hashing worker: {0}")]
    WorkerSpawn(#[source] io::Error),

    #[error("hashing worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("{} was not hashed because a worker panicked", path.display())]
    Abandoned { path: PathBuf },
}

impl HashError {
    /// The file this error refers to, if it is a per-file failure
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileOpen { path, .. }
            | Self::FileRead { path, .. }
            | Self::Abandoned { path } => Some(path),
            _ => None,
        }
    }

    /// Whether this error aborts a whole batch rather than a single file
    #[must_use]
    pub const fn is_batch_level(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAlgorithm(_) | Self::NoValidAlgorithms | Self::WorkerSpawn(_)
        )
    }
}

/// Errors raised while enumerating the input directory
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot access input directory {}: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}
