//! Report format selector

use std::fmt;
use std::str::FromStr;

/// Output layout for reports and terminal echo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// One row per (file, algorithm)
    #[default]
    Standard,
    /// One row per file, one column per algorithm present
    Condensed,
    /// Fixed md5/sha1/sha256/sha512 columns for IOC tooling
    Ioc,
    /// Pretty-printed array of file records
    Json,
}

impl OutputFormat {
    pub const ALL: [Self; 4] = [Self::Standard, Self::Condensed, Self::Ioc, Self::Json];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Condensed => "condensed",
            Self::Ioc => "ioc",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown output format '{s}' (expected standard, condensed, ioc or json)")
            })
    }
}
