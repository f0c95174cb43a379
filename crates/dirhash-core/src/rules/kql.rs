//! KQL hunting query generation

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};

use super::RuleError;
use super::text::{quoted, sanitize_identifier};
use crate::algorithm::HashAlgorithm;
use crate::scanner::FileRecord;

/// Query name used when the requested one sanitizes to nothing
pub const DEFAULT_QUERY_NAME: &str = "dirhash_generated_query";

/// Table searched when none are configured
pub const DEFAULT_TABLE: &str = "DeviceFileEvents";

const AUTHOR: &str = "DirHash";
const FILENAME_FIELD: &str = "FileName";

/// Knobs for [`KqlQuery::generate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KqlOptions {
    /// Log tables to search, unioned when more than one
    pub tables: Vec<String>,
    /// Algorithms to include; empty means every digest present
    pub hash_types: Vec<HashAlgorithm>,
    /// Argument to `ago()`, e.g. `7d`
    pub time_range: String,
    /// `take` limit; zero disables it
    pub max_results: usize,
    pub include_hashes: bool,
    pub include_filenames: bool,
    pub case_sensitive: bool,
    /// Emit the `//` header block
    pub include_metadata: bool,
    /// Append usage notes to the header block
    pub include_comments: bool,
}

impl Default for KqlOptions {
    fn default() -> Self {
        Self {
            tables: vec![DEFAULT_TABLE.to_string()],
            hash_types: Vec::new(),
            time_range: "7d".to_string(),
            max_results: 1000,
            include_hashes: true,
            include_filenames: true,
            case_sensitive: false,
            include_metadata: true,
            include_comments: true,
        }
    }
}

impl KqlOptions {
    /// Defaults with filename matching turned off
    #[must_use]
    pub fn hash_only(hash_types: &[HashAlgorithm]) -> Self {
        Self {
            hash_types: hash_types.to_vec(),
            include_filenames: false,
            ..Self::default()
        }
    }
}

/// A generated query plus the data it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KqlQuery {
    pub name: String,
    pub description: String,
    pub author: String,
    pub generated: DateTime<Utc>,
    pub tags: Vec<String>,
    /// De-duplicated, sorted digests per algorithm
    pub hashes: BTreeMap<HashAlgorithm, BTreeSet<String>>,
    /// De-duplicated, sorted file names
    pub filenames: BTreeSet<String>,
    pub options: KqlOptions,
}

impl KqlQuery {
    /// Build a query from hashed files
    ///
    /// # Errors
    /// Returns [`RuleError::NoFiles`] if `files` is empty.
    pub fn generate(
        files: &[FileRecord],
        name: &str,
        options: KqlOptions,
    ) -> Result<Self, RuleError> {
        if files.is_empty() {
            return Err(RuleError::NoFiles);
        }

        let mut hashes: BTreeMap<HashAlgorithm, BTreeSet<String>> = BTreeMap::new();
        let mut filenames = BTreeSet::new();

        for file in files {
            if options.include_filenames && !file.name.is_empty() {
                filenames.insert(file.name.clone());
            }
            if !options.include_hashes {
                continue;
            }
            for (algorithm, digest) in &file.digests {
                let wanted =
                    options.hash_types.is_empty() || options.hash_types.contains(algorithm);
                if wanted && !digest.is_empty() {
                    hashes.entry(*algorithm).or_default().insert(digest.clone());
                }
            }
        }

        let mut options = options;
        if options.tables.is_empty() {
            options.tables.push(DEFAULT_TABLE.to_string());
        }

        Ok(Self {
            name: sanitize_identifier(name, DEFAULT_QUERY_NAME),
            description: format!(
                "KQL query to detect files based on hashes and filenames - Generated from {} files",
                files.len()
            ),
            author: AUTHOR.to_string(),
            generated: Utc::now(),
            tags: Vec::from(
                ["threat-hunting", "file-detection", "security", "dirhash"].map(String::from),
            ),
            hashes,
            filenames,
            options,
        })
    }

    /// Build a query that matches on digests only
    ///
    /// # Errors
    /// Returns [`RuleError::NoFiles`] if `files` is empty.
    pub fn hash_only(
        files: &[FileRecord],
        name: &str,
        hash_types: &[HashAlgorithm],
    ) -> Result<Self, RuleError> {
        Self::generate(files, name, KqlOptions::hash_only(hash_types))
    }

    /// Override the generation timestamp
    #[must_use]
    pub fn with_generated(mut self, generated: DateTime<Utc>) -> Self {
        self.generated = generated;
        self
    }

    /// Algorithms that contribute at least one digest
    #[must_use]
    pub fn hash_types(&self) -> Vec<HashAlgorithm> {
        self.hashes.keys().copied().collect()
    }

    /// Total digests across all algorithms
    #[must_use]
    pub fn hash_count(&self) -> usize {
        self.hashes.values().map(BTreeSet::len).sum()
    }

    /// The executable query without the header block
    #[must_use]
    pub fn body(&self) -> String {
        let tables: Vec<String> = self
            .options
            .tables
            .iter()
            .map(|table| self.table_query(table))
            .collect();

        let mut lines = Vec::new();
        if tables.len() > 1 {
            lines.push(format!("union (\n{}\n)", tables.join("\n),\n(")));
        } else {
            lines.extend(tables);
        }
        lines.push("| sort by TimeGenerated desc".to_string());
        if self.options.max_results > 0 {
            lines.push(format!("| take {}", self.options.max_results));
        }
        lines.join("\n")
    }

    /// `//` header lines, empty when metadata is disabled
    #[must_use]
    pub fn comments(&self) -> Vec<String> {
        if !self.options.include_metadata {
            return Vec::new();
        }

        let mut lines = vec![
            format!("// KQL Query: {}", self.name),
            format!("// Description: {}", self.description),
            format!("// Author: {}", self.author),
            format!(
                "// Generated: {}",
                self.generated.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            format!("// Tags: {}", self.tags.join(", ")),
            "//".to_string(),
        ];

        if !self.hashes.is_empty() {
            let types: Vec<&str> = self.hashes.keys().map(|alg| alg.name()).collect();
            lines.push(format!("// Hash Count: {}", self.hash_count()));
            lines.push(format!("// Hash Types: {}", types.join(", ")));
        }
        if !self.filenames.is_empty() {
            lines.push(format!("// Filename Count: {}", self.filenames.len()));
        }

        lines.push(format!("// Tables: {}", self.options.tables.join(", ")));
        lines.push(format!("// Time Range: {}", self.options.time_range));
        lines.push(format!("// Max Results: {}", self.options.max_results));

        if self.options.include_comments {
            lines.extend(
                [
                    "//",
                    "// Searches for files by cryptographic hash and file name.",
                    "// Suitable for threat hunting and incident response.",
                    "// Adjust the time range and result limit for your environment.",
                ]
                .map(String::from),
            );
        }
        lines
    }

    fn table_query(&self, table: &str) -> String {
        let mut parts = vec![table.to_string()];

        if !self.options.time_range.is_empty() {
            parts.push(format!(
                "| where TimeGenerated >= ago({})",
                self.options.time_range
            ));
        }

        let mut conditions = Vec::new();

        let hash_conditions: Vec<String> = self
            .hashes
            .iter()
            .filter_map(|(algorithm, digests)| {
                let field = hash_field(table, *algorithm)?;
                Some(format!("({field} in ({}))", quoted_list(digests)))
            })
            .collect();
        if !hash_conditions.is_empty() {
            conditions.push(format!("({})", hash_conditions.join(" or ")));
        }

        if !self.filenames.is_empty() {
            let operator = if self.options.case_sensitive { "in" } else { "in~" };
            conditions.push(format!(
                "({FILENAME_FIELD} {operator} ({}))",
                quoted_list(&self.filenames)
            ));
        }

        if !conditions.is_empty() {
            parts.push(format!("| where {}", conditions.join(" or ")));
        }

        parts.push(format!("| project TimeGenerated, {}", project_fields(table)));
        parts.push(format!("| extend SourceTable = {}", quoted(table)));
        parts.join("\n")
    }
}

impl fmt::Display for KqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comments = self.comments();
        if !comments.is_empty() {
            writeln!(f, "{}\n", comments.join("\n"))?;
        }
        f.write_str(&self.body())
    }
}

/// Column holding `algorithm` digests in `table`, if it has one
fn hash_field(table: &str, algorithm: HashAlgorithm) -> Option<String> {
    match table {
        "DeviceFileEvents" => match algorithm {
            HashAlgorithm::Md5 => Some("MD5".to_string()),
            HashAlgorithm::Sha1 => Some("SHA1".to_string()),
            HashAlgorithm::Sha256 => Some("SHA256".to_string()),
            HashAlgorithm::Sha512 => None,
        },
        "SecurityEvents" | "CommonSecurityLog" => Some("FileHash".to_string()),
        _ => Some(format!("{}Hash", algorithm.name().to_uppercase())),
    }
}

fn project_fields(table: &str) -> &'static str {
    match table {
        "DeviceFileEvents" => {
            "DeviceName, FileName, FolderPath, MD5, SHA1, SHA256, ProcessCommandLine, InitiatingProcessFileName"
        }
        "SecurityEvents" | "CommonSecurityLog" => {
            "Computer, FileName, FilePath, FileHash, ProcessName, CommandLine"
        }
        _ => "Computer, FileName, FilePath, FileHash",
    }
}

fn quoted_list(values: &BTreeSet<String>) -> String {
    values
        .iter()
        .map(|v| quoted(v))
        .collect::<Vec<_>>()
        .join(", ")
}
