//! dirhash-core: Concurrent single-pass directory hashing
//!
//! Walks a directory tree, computes one or more cryptographic digests per
//! file while reading every file exactly once, and renders the results as
//! reports or detection artifacts.
//!
//! # Supported algorithms
//!
//! - **md5**
//! - **sha1**
//! - **sha256**
//! - **sha512**

pub mod algorithm;
pub mod error;
pub mod hasher;
pub mod output;
pub mod rules;
pub mod scanner;

// Re-export commonly used types
pub use algorithm::{HashAlgorithm, resolve_algorithms};
pub use error::{HashError, ScanError};
pub use hasher::{HashBatch, HashEngine, hash_file};
pub use output::{OutputError, OutputFormat};
pub use rules::{KqlOptions, KqlQuery, RuleError, YaraRule};
pub use scanner::{Digests, FileRecord, Scanner};
