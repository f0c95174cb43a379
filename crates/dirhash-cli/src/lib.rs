//! dirhash-cli library
//!
//! This module exposes the argument model and command runner of the
//! `dirhash` binary for testing purposes.

pub mod cli;

// Make commands module available for internal tests only
#[doc(hidden)]
pub mod commands;

pub mod logging;

pub use cli::{Cli, FormatArg};
