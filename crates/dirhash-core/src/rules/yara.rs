//! YARA rule generation

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::{NaiveDate, Utc};

use super::RuleError;
use super::text::{quoted, sanitize_identifier};
use crate::algorithm::HashAlgorithm;
use crate::scanner::FileRecord;

/// Rule name used when the requested one sanitizes to nothing
pub const DEFAULT_RULE_NAME: &str = "dirhash_generated_rule";

const AUTHOR: &str = "DirHash";
const FALLBACK_STEM: &str = "file";
const FILENAME_PREFIX: &str = "filename";

/// How a string's value is written in the `strings:` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YaraStringKind {
    /// `{ AB CD ... }` byte pattern
    Hex,
    /// Quoted text literal
    Text,
}

/// One entry in the `strings:` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YaraString {
    /// Identifier including the leading `$`
    pub identifier: String,
    pub value: String,
    pub kind: YaraStringKind,
}

/// A single generated YARA rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YaraRule {
    pub name: String,
    pub description: String,
    pub author: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub strings: Vec<YaraString>,
    pub condition: String,
}

impl YaraRule {
    /// Build a rule matching any file's digests or any file name
    ///
    /// # Errors
    /// Returns [`RuleError::NoFiles`] if `files` is empty.
    pub fn from_files(files: &[FileRecord], name: &str) -> Result<Self, RuleError> {
        if files.is_empty() {
            return Err(RuleError::NoFiles);
        }

        let mut identifiers = Identifiers::default();
        let mut strings = hash_strings(files, &HashAlgorithm::ALL, &mut identifiers);
        let hash_count = strings.len();
        strings.extend(filename_strings(files, &mut identifiers));

        let (hashes, names) = strings.split_at(hash_count);
        let condition = join_conditions([group_condition(hashes), group_condition(names)]);

        Ok(Self {
            name: sanitize_identifier(name, DEFAULT_RULE_NAME),
            description: format!("Generated rule based on {} files", files.len()),
            author: AUTHOR.to_string(),
            date: Utc::now().date_naive(),
            tags: vec!["generated".to_string(), "dirhash".to_string()],
            strings,
            condition,
        })
    }

    /// Build a rule from digests of the given algorithms only
    ///
    /// # Errors
    /// Returns [`RuleError::NoFiles`] if `files` is empty, or
    /// [`RuleError::NoHashes`] if no file carries a digest for any of
    /// `algorithms`.
    pub fn from_hashes(
        files: &[FileRecord],
        name: &str,
        algorithms: &[HashAlgorithm],
    ) -> Result<Self, RuleError> {
        if files.is_empty() {
            return Err(RuleError::NoFiles);
        }

        let mut identifiers = Identifiers::default();
        let strings = hash_strings(files, algorithms, &mut identifiers);
        if strings.is_empty() {
            return Err(RuleError::NoHashes);
        }
        let condition = join_conditions([group_condition(&strings)]);

        Ok(Self {
            name: sanitize_identifier(name, DEFAULT_RULE_NAME),
            description: format!("Hash-based rule for {} files", files.len()),
            author: AUTHOR.to_string(),
            date: Utc::now().date_naive(),
            tags: vec![
                "hash".to_string(),
                "generated".to_string(),
                "dirhash".to_string(),
            ],
            strings,
            condition,
        })
    }

    /// Override the generation date
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

impl fmt::Display for YaraRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rule {}\n{{", self.name)?;
        writeln!(f, "    meta:")?;
        writeln!(f, "        description = {}", quoted(&self.description))?;
        writeln!(f, "        author = {}", quoted(&self.author))?;
        writeln!(f, "        date = \"{}\"", self.date.format("%Y-%m-%d"))?;
        if !self.tags.is_empty() {
            writeln!(f, "        tags = {}", quoted(&self.tags.join(", ")))?;
        }

        if !self.strings.is_empty() {
            writeln!(f, "\n    strings:")?;
            for string in &self.strings {
                match string.kind {
                    YaraStringKind::Hex => {
                        writeln!(f, "        {} = {{ {} }}", string.identifier, string.value)?;
                    }
                    YaraStringKind::Text => {
                        writeln!(f, "        {} = {}", string.identifier, quoted(&string.value))?;
                    }
                }
            }
        }

        writeln!(f, "\n    condition:")?;
        writeln!(f, "        {}", self.condition)?;
        writeln!(f, "}}")
    }
}

/// Hands out unique `$prefix_stem` identifiers, suffixing repeats
#[derive(Default)]
struct Identifiers {
    used: HashSet<String>,
}

impl Identifiers {
    fn next(&mut self, prefix: &str, file_name: &str) -> String {
        let base = format!("${prefix}_{}", string_stem(file_name));
        let mut candidate = base.clone();
        let mut n = 2;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        candidate
    }
}

/// Sanitized file name without its extension
fn string_stem(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_identifier(&stem, FALLBACK_STEM)
}

fn hash_strings(
    files: &[FileRecord],
    algorithms: &[HashAlgorithm],
    identifiers: &mut Identifiers,
) -> Vec<YaraString> {
    let mut strings = Vec::new();
    for file in files {
        for &algorithm in algorithms {
            let Some(digest) = file.digest(algorithm).filter(|d| !d.is_empty()) else {
                continue;
            };
            strings.push(YaraString {
                identifier: identifiers.next(algorithm.name(), &file.name),
                value: hex_pattern(digest),
                kind: YaraStringKind::Hex,
            });
        }
    }
    strings
}

fn filename_strings(files: &[FileRecord], identifiers: &mut Identifiers) -> Vec<YaraString> {
    let mut seen = HashSet::new();
    files
        .iter()
        .filter(|file| !file.name.is_empty() && seen.insert(file.name.as_str()))
        .map(|file| YaraString {
            identifier: identifiers.next(FILENAME_PREFIX, &file.name),
            value: file.name.clone(),
            kind: YaraStringKind::Text,
        })
        .collect()
}

/// `abcd12` becomes `AB CD 12`; a trailing odd nibble is dropped
pub(crate) fn hex_pattern(digest: &str) -> String {
    digest
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| String::from_utf8_lossy(pair).to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn group_condition(strings: &[YaraString]) -> Option<String> {
    match strings {
        [] => None,
        [single] => Some(single.identifier.clone()),
        many => {
            let names: Vec<&str> = many.iter().map(|s| s.identifier.as_str()).collect();
            Some(format!("any of ({})", names.join(", ")))
        }
    }
}

fn join_conditions<const N: usize>(groups: [Option<String>; N]) -> String {
    let parts: Vec<String> = groups.into_iter().flatten().collect();
    if parts.is_empty() {
        "true".to_string()
    } else {
        parts.join(" or ")
    }
}
