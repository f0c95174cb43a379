//! Command-line arguments

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dirhash_core::OutputFormat;
use dirhash_core::rules::{DEFAULT_QUERY_NAME, DEFAULT_RULE_NAME, DEFAULT_TABLE};

#[derive(Debug, Parser)]
#[command(name = "dirhash")]
#[command(
    author,
    version,
    about = "Hash every file under a directory with one or more algorithms",
    long_about = None
)]
pub struct Cli {
    /// Directory to scan recursively
    #[arg(short, long = "input-dir", default_value = ".")]
    pub input_dir: PathBuf,

    /// Write the report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hash algorithms to use (md5, sha1, sha256, sha512)
    #[arg(short, long = "algorithm", num_args = 1.., default_value = "md5")]
    pub algorithms: Vec<String>,

    /// Report layout
    #[arg(short, long, value_enum, default_value_t = FormatArg::Standard)]
    pub format: FormatArg,

    /// Also print results to the terminal
    #[arg(short, long)]
    pub terminal: bool,

    /// Write a YARA rule to this file
    #[arg(short, long)]
    pub yara: Option<PathBuf>,

    /// Name of the generated YARA rule
    #[arg(long, default_value = DEFAULT_RULE_NAME)]
    pub yara_rule_name: String,

    /// Only include hashes in the YARA rule
    #[arg(long)]
    pub yara_hash_only: bool,

    /// Write a KQL query to this file
    #[arg(short = 'q', long)]
    pub kql: Option<PathBuf>,

    /// Name of the generated KQL query
    #[arg(long, default_value = DEFAULT_QUERY_NAME)]
    pub kql_name: String,

    /// Only include hashes in the KQL query
    #[arg(long)]
    pub kql_hash_only: bool,

    /// Log tables the KQL query searches
    #[arg(long, num_args = 1.., default_value = DEFAULT_TABLE)]
    pub kql_tables: Vec<String>,

    /// Maximum number of hashing workers
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether results go to the terminal
    ///
    /// Always true when no output file was given.
    #[must_use]
    pub fn echo_to_terminal(&self) -> bool {
        self.terminal || self.output.is_none()
    }
}

/// `--format` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Standard,
    Condensed,
    Ioc,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Standard => Self::Standard,
            FormatArg::Condensed => Self::Condensed,
            FormatArg::Ioc => Self::Ioc,
            FormatArg::Json => Self::Json,
        }
    }
}
