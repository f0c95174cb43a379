//! Per-file digest computation with a fan-out writer

use std::fs::File;
use std::io::{self, BufReader, Read, Write};

use digest::DynDigest;

use crate::algorithm::HashAlgorithm;
use crate::error::HashError;
use crate::scanner::{Digests, FileRecord};

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// A byte sink that forwards every chunk to one accumulator per algorithm
pub struct MultiDigest {
    accumulators: Vec<(HashAlgorithm, Box<dyn DynDigest + Send>)>,
}

impl MultiDigest {
    /// Create fresh accumulators for the given algorithms
    #[must_use]
    pub fn new(algorithms: &[HashAlgorithm]) -> Self {
        Self {
            accumulators: algorithms
                .iter()
                .map(|&alg| (alg, alg.accumulator()))
                .collect(),
        }
    }

    /// Feed one chunk to every accumulator
    pub fn update(&mut self, chunk: &[u8]) {
        for (_, accumulator) in &mut self.accumulators {
            accumulator.update(chunk);
        }
    }

    /// Finalize all accumulators into lowercase hex digests
    #[must_use]
    pub fn finalize(self) -> Digests {
        self.accumulators
            .into_iter()
            .map(|(alg, accumulator)| (alg, hex::encode(accumulator.finalize())))
            .collect()
    }
}

impl Write for MultiDigest {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stream a reader through all requested algorithms in one pass
///
/// # Errors
/// Returns the reader's error if a read fails partway through.
pub fn digest_reader<R: Read>(mut reader: R, algorithms: &[HashAlgorithm]) -> io::Result<Digests> {
    let mut sink = MultiDigest::new(algorithms);
    // The sink never fails, so any error here came from the reader.
    io::copy(&mut reader, &mut sink)?;
    Ok(sink.finalize())
}

/// Hash one file with every requested algorithm, reading it exactly once
///
/// On success the record holds a digest for every algorithm. On failure
/// the record's digests are left untouched.
///
/// # Errors
/// Returns `FileOpen` if the path cannot be opened as a regular file, or
/// `FileRead` if reading fails partway through.
pub fn hash_file(record: &mut FileRecord, algorithms: &[HashAlgorithm]) -> Result<(), HashError> {
    let file = File::open(&record.path).map_err(|source| HashError::FileOpen {
        path: record.path.clone(),
        source,
    })?;

    let is_dir = file
        .metadata()
        .map_err(|source| HashError::FileOpen {
            path: record.path.clone(),
            source,
        })?
        .is_dir();
    if is_dir {
        return Err(HashError::FileOpen {
            path: record.path.clone(),
            source: io::Error::other("is a directory"),
        });
    }

    hash_reader_into(record, BufReader::with_capacity(READ_BUFFER_SIZE, file), algorithms)
}

/// Digest `reader` and record the results only if the whole stream was read
pub(crate) fn hash_reader_into<R: Read>(
    record: &mut FileRecord,
    reader: R,
    algorithms: &[HashAlgorithm],
) -> Result<(), HashError> {
    let digests = digest_reader(reader, algorithms).map_err(|source| HashError::FileRead {
        path: record.path.clone(),
        source,
    })?;
    record.digests.extend(digests);
    Ok(())
}
