//! Static algorithm table and request validation

use std::fmt;
use std::str::FromStr;

use digest::DynDigest;
use serde::{Deserialize, Serialize};

use crate::error::HashError;

/// A supported cryptographic hash algorithm
///
/// Discriminants are the stable numeric ids; declaration order is the
/// canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5 = 0,
    Sha1 = 1,
    Sha256 = 2,
    Sha512 = 3,
}

impl HashAlgorithm {
    /// Every supported algorithm, in id order
    pub const ALL: [Self; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512];

    /// Stable numeric identifier
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Canonical lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Length of the hex-encoded digest
    #[must_use]
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }

    /// Look up an algorithm by numeric id
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.id() == id)
    }

    /// Look up an algorithm by name (case-insensitive)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name))
    }

    /// Fresh accumulator for this algorithm
    pub(crate) fn accumulator(self) -> Box<dyn DynDigest + Send> {
        match self {
            Self::Md5 => Box::new(md5::Md5::default()),
            Self::Sha1 => Box::new(sha1::Sha1::default()),
            Self::Sha256 => Box::new(sha2::Sha256::default()),
            Self::Sha512 => Box::new(sha2::Sha512::default()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    /// Accepts a canonical name or a numeric id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .or_else(|| s.trim().parse::<u8>().ok().and_then(Self::from_id))
            .ok_or_else(|| HashError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Validate and de-duplicate a requested algorithm list
///
/// Entries may be names or numeric ids. The first occurrence of each
/// algorithm wins, so the caller's ordering is kept.
///
/// # Errors
/// Returns `UnsupportedAlgorithm` naming the first unknown entry, or
/// `NoValidAlgorithms` if the request is empty.
pub fn resolve_algorithms<I, S>(requested: I) -> Result<Vec<HashAlgorithm>, HashError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut algorithms = Vec::with_capacity(HashAlgorithm::ALL.len());
    for entry in requested {
        let algorithm: HashAlgorithm = entry.as_ref().parse()?;
        if !algorithms.contains(&algorithm) {
            algorithms.push(algorithm);
        }
    }

    if algorithms.is_empty() {
        return Err(HashError::NoValidAlgorithms);
    }
    Ok(algorithms)
}
