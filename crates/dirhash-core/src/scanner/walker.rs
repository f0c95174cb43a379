//! File walker: Discovers regular files in a directory tree

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::FileRecord;
use crate::error::ScanError;

/// Scanner for enumerating files under a root directory
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    follow_links: bool,
}

impl Scanner {
    /// Create a new scanner for the given root directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    /// Follow symbolic links while walking
    #[must_use]
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Get the root directory being scanned
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and return a record for every regular file
    ///
    /// Entries that cannot be read are logged and skipped.
    ///
    /// # Errors
    /// Returns an error if the root is missing or is not a directory.
    pub fn scan(&self) -> Result<Vec<FileRecord>, ScanError> {
        let root_meta = std::fs::metadata(&self.root).map_err(|source| ScanError::Root {
            path: self.root.clone(),
            source,
        })?;
        if !root_meta.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(self.follow_links) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error accessing path {}: {}", display_walk_path(&e), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.metadata() {
                Ok(metadata) => files.push(FileRecord::from_metadata(entry.into_path(), &metadata)),
                Err(e) => warn!("Error reading metadata for {}: {}", entry.path().display(), e),
            }
        }

        debug!("Enumerated {} files under {}", files.len(), self.root.display());
        Ok(files)
    }
}

fn display_walk_path(error: &walkdir::Error) -> String {
    error
        .path()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string())
}
