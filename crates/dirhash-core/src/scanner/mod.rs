//! Scanner module: File discovery
//!
//! Responsible for walking the input directory and producing one
//! [`FileRecord`] per regular file, ready for hashing.

mod record;
mod walker;

pub use record::{Digests, FileRecord};
pub use walker::Scanner;
