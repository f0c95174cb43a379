//! Rules module: Detection artifact generation
//!
//! Turns hashed file records into a YARA rule or a KQL hunting query.
//! Both generators only read digests and file names; they never touch
//! the filesystem.

mod kql;
mod text;
mod yara;

use thiserror::Error;

pub use kql::{DEFAULT_QUERY_NAME, DEFAULT_TABLE, KqlOptions, KqlQuery};
pub use yara::{DEFAULT_RULE_NAME, YaraRule, YaraString, YaraStringKind};

/// Errors that can occur while generating a rule or query
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("no files provided for rule generation")]
    NoFiles,

    #[error("no hashes found for the requested algorithms")]
    NoHashes,
}

#[cfg(test)]
mod tests;
