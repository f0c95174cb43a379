//! Worker pool scheduler and result aggregation

use std::io;
use std::num::NonZeroUsize;
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded, never, select};
use tracing::{debug, warn};

use super::fanout::hash_file;
use crate::algorithm::{HashAlgorithm, resolve_algorithms};
use crate::error::HashError;
use crate::scanner::FileRecord;

/// Number of workers for a batch: at least one when there is work, never
/// more than the batch size or the available parallelism.
#[must_use]
pub fn worker_count(parallelism: usize, batch_size: usize) -> usize {
    parallelism.max(1).min(batch_size)
}

/// Outcome of hashing one batch of files
#[derive(Debug, Default)]
pub struct HashBatch {
    /// Successfully hashed records, in completion order
    pub files: Vec<FileRecord>,
    /// Per-file failures, in the order they were collected
    pub failures: Vec<HashError>,
    /// Number of workers that ran the batch
    pub workers: usize,
}

impl HashBatch {
    /// The representative error for the batch, if any file failed
    #[must_use]
    pub fn first_error(&self) -> Option<&HashError> {
        self.failures.first()
    }

    /// Whether every file in the batch was hashed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Sort hashed records by path for deterministic output
    pub fn sort_by_path(&mut self) {
        self.files.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Split into the successes and the first error
    #[must_use]
    pub fn into_parts(self) -> (Vec<FileRecord>, Option<HashError>) {
        (self.files, self.failures.into_iter().next())
    }
}

/// Immutable configuration for hashing batches of files
#[derive(Debug, Clone)]
pub struct HashEngine {
    algorithms: Vec<HashAlgorithm>,
    max_workers: Option<NonZeroUsize>,
}

impl HashEngine {
    /// Create an engine for the given algorithms; duplicates are dropped
    #[must_use]
    pub fn new(algorithms: impl IntoIterator<Item = HashAlgorithm>) -> Self {
        let mut unique = Vec::new();
        for alg in algorithms {
            if !unique.contains(&alg) {
                unique.push(alg);
            }
        }
        Self {
            algorithms: unique,
            max_workers: None,
        }
    }

    /// Create an engine from raw algorithm names or ids
    ///
    /// # Errors
    /// Returns an error if any entry is unsupported or the list is empty.
    pub fn from_names<I, S>(names: I) -> Result<Self, HashError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(resolve_algorithms(names)?))
    }

    /// Cap the number of workers below the available parallelism
    #[must_use]
    pub fn with_max_workers(mut self, max_workers: NonZeroUsize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    /// The validated algorithms every file is hashed with
    #[must_use]
    pub fn algorithms(&self) -> &[HashAlgorithm] {
        &self.algorithms
    }

    /// Workers that would be spawned for a batch of `batch_size` files
    #[must_use]
    pub fn workers_for(&self, batch_size: usize) -> usize {
        let available = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let parallelism = self
            .max_workers
            .map_or(available, |cap| cap.get().min(available));
        worker_count(parallelism, batch_size)
    }

    /// Hash every file in the batch concurrently
    ///
    /// Per-file failures never abort the batch: failed files are left out
    /// of `files` and reported in `failures`. Returns only after every
    /// worker has exited.
    ///
    /// # Errors
    /// Returns `NoValidAlgorithms` if the engine has no algorithms, or
    /// `WorkerSpawn` if no worker thread could be started.
    pub fn run(&self, files: Vec<FileRecord>) -> Result<HashBatch, HashError> {
        if self.algorithms.is_empty() {
            return Err(HashError::NoValidAlgorithms);
        }
        if files.is_empty() {
            return Ok(HashBatch::default());
        }

        let total = files.len();
        let workers = self.workers_for(total);
        debug!(
            "Hashing {} files with {} workers ({})",
            total,
            workers,
            self.algorithm_names()
        );

        // Queue and sinks hold the whole batch, so neither side ever blocks on send.
        let (work_tx, work_rx) = bounded::<FileRecord>(total);
        for file in files {
            if work_tx.send(file).is_err() {
                break;
            }
        }
        drop(work_tx);

        let (result_tx, result_rx) = bounded::<FileRecord>(total);
        let (error_tx, error_rx) = bounded::<HashError>(total);
        let algorithms = self.algorithms.as_slice();

        let mut batch = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;

            for index in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let error_tx = error_tx.clone();
                let spawned = thread::Builder::new()
                    .name(format!("dirhash-worker-{index}"))
                    .spawn_scoped(scope, move || {
                        run_worker(index, &work_rx, &result_tx, &error_tx, algorithms);
                    });
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        warn!("Failed to spawn worker {}: {}", index, e);
                        spawn_error = Some(e);
                        break;
                    }
                }
            }

            // Only workers hold senders now; the sinks close when the last one exits.
            drop(result_tx);
            drop(error_tx);

            if handles.is_empty() {
                let e = spawn_error.unwrap_or_else(|| io::Error::other("no workers started"));
                return Err(HashError::WorkerSpawn(e));
            }

            let mut batch = aggregate(&result_rx, &error_rx, total);
            batch.workers = handles.len();

            for (worker, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() {
                    warn!("Hashing worker {} panicked", worker);
                    batch.failures.push(HashError::WorkerPanicked { worker });
                }
            }
            Ok(batch)
        })?;

        // Anything a panicked worker never took off the queue is still here.
        for record in work_rx.try_iter() {
            batch
                .failures
                .push(HashError::Abandoned { path: record.path });
        }

        debug!(
            "Hashed {} of {} files ({} failed)",
            batch.files.len(),
            total,
            batch.failures.len()
        );
        Ok(batch)
    }

    fn algorithm_names(&self) -> String {
        self.algorithms
            .iter()
            .map(|alg| alg.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Pull files until the queue is closed and empty
fn run_worker(
    index: usize,
    work: &Receiver<FileRecord>,
    results: &Sender<FileRecord>,
    errors: &Sender<HashError>,
    algorithms: &[HashAlgorithm],
) {
    for mut record in work.iter() {
        match hash_file(&mut record, algorithms) {
            Ok(()) => {
                debug!(worker = index, "Hashed {}", record.path.display());
                if results.send(record).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(worker = index, "{}", e);
                if errors.send(e).is_err() {
                    break;
                }
            }
        }
    }
}

/// Drain both sinks until every sender has been dropped
fn aggregate(
    results: &Receiver<FileRecord>,
    errors: &Receiver<HashError>,
    capacity: usize,
) -> HashBatch {
    let mut batch = HashBatch {
        files: Vec::with_capacity(capacity),
        ..HashBatch::default()
    };
    let closed_results = never::<FileRecord>();
    let closed_errors = never::<HashError>();
    let mut results_open = true;
    let mut errors_open = true;

    while results_open || errors_open {
        let results_rx = if results_open { results } else { &closed_results };
        let errors_rx = if errors_open { errors } else { &closed_errors };
        select! {
            recv(results_rx) -> msg => match msg {
                Ok(record) => batch.files.push(record),
                Err(_) => results_open = false,
            },
            recv(errors_rx) -> msg => match msg {
                Ok(error) => batch.failures.push(error),
                Err(_) => errors_open = false,
            },
        }
    }
    batch
}
