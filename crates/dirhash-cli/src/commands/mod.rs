//! CLI commands

pub mod hash;
