//! Algorithm module: Registry of supported digest functions
//!
//! Maps stable numeric ids and canonical names to the four supported
//! algorithms and validates user-requested algorithm lists.

mod registry;

pub use registry::{HashAlgorithm, resolve_algorithms};
