//! Hasher module: Concurrent single-pass hashing engine
//!
//! Each file is read exactly once and every chunk is fanned out to one
//! accumulator per requested algorithm. A bounded pool of worker threads
//! drains a shared queue of files, and an aggregator collects successes and
//! per-file failures until both result channels are closed.

mod engine;
mod fanout;

pub use engine::{HashBatch, HashEngine, worker_count};
pub use fanout::{MultiDigest, digest_reader, hash_file};
