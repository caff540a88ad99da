//! The concurrent signature pipeline.
//!
//! Data flows `Reader -> BlockQueue -> HasherPool -> OutputRing ->
//! Writer`. The reader and the hasher pool run on background threads;
//! the writer runs on the calling thread. Back-pressure comes from one
//! place only: the reader must acquire a buffer from the bounded
//! [`pool::BufferPool`] before it can read a block, so a stalled writer
//! stalls the hashers (no freed buffers) which stalls the reader.
//!
//! Every pre-flight check runs in [`SignatureGenerator::new`], before
//! any buffer is allocated or thread spawned. Runtime failures are
//! recorded first-wins in the [`ring::OutputRing`] and re-raised from
//! [`SignatureGenerator::generate`] once all threads have joined.

pub mod hasher;
pub mod pool;
pub mod reader;
pub mod ring;
pub mod writer;

use std::fs::File;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use crate::config::{DIGEST_SIZE, FALLBACK_CORES, MEMORY_CEILING, POOL_FACTOR, RESERVED_CORES};
use crate::engine::hasher::HasherPool;
use crate::engine::pool::BufferPool;
use crate::engine::reader::Reader;
use crate::engine::ring::OutputRing;
use crate::engine::writer::Writer;
use crate::error::SignatureError;
use crate::file::{operations, validation};
use crate::ui::progress::ProgressBar;

/// One-shot signature run over a single input file.
#[derive(Debug)]
pub struct SignatureGenerator {
    input: File,
    output: File,
    block_size: usize,
    file_size: u64,
    block_count: u64,
    worker_count: usize,
}

impl SignatureGenerator {
    /// Validates the configuration and prepares both files.
    ///
    /// `block_size` is in bytes. Checks run in a fixed order: block
    /// size, input existence, empty input, memory ceiling, output
    /// creation, disk space. The empty-input check precedes output
    /// creation so a refused run never truncates an existing signature.
    pub fn new(input_path: &Path, output_path: &Path, block_size: u64) -> Result<Self, SignatureError> {
        validation::validate_block_size(block_size)?;
        let file_size = validation::validate_input(input_path)?;

        let block_len = usize::try_from(block_size)
            .map_err(|_| SignatureError::InvalidParameter { reason: format!("block size of {block_size} bytes does not fit this platform") })?;

        let block_count = file_size.div_ceil(block_size);
        let worker_count = default_worker_count();
        let pool_size = worker_count * POOL_FACTOR;

        match (pool_size as u64).checked_mul(block_size) {
            Some(pool_bytes) if pool_bytes <= MEMORY_CEILING => {}
            _ => {
                return Err(SignatureError::InvalidParameter {
                    reason: format!(
                        "buffer pool of {pool_size} x {block_size} bytes would exceed the {MEMORY_CEILING}-byte memory ceiling"
                    ),
                });
            }
        }

        let input = operations::open_input(input_path)?;
        let output = operations::create_output(output_path)?;

        let needed = block_count.checked_mul(DIGEST_SIZE as u64).unwrap_or(u64::MAX);
        let available = operations::available_space(output_path)?;
        if available < needed {
            return Err(SignatureError::InsufficientDiskSpace { needed, available });
        }

        Ok(Self { input, output, block_size: block_len, file_size, block_count, worker_count })
    }

    /// Size of the input file in bytes.
    #[inline]
    #[must_use]
    pub const fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Number of blocks (and digests) the signature will contain.
    #[inline]
    #[must_use]
    pub const fn block_count(&self) -> u64 {
        self.block_count
    }

    /// Number of parallel hasher threads.
    #[inline]
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Pins the hasher count, bypassing the core-count heuristic.
    #[cfg(test)]
    pub(crate) fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers.max(1);
        self
    }

    /// Runs the pipeline to completion.
    ///
    /// Spawns the reader and the hasher pool, drives the writer on the
    /// calling thread, joins everything and returns the first recorded
    /// error, if any. On failure the partially written output is left
    /// as-is; the caller is expected to discard it.
    pub fn generate(self) -> Result<(), SignatureError> {
        let Self { input, output, block_size, file_size, block_count, worker_count } = self;
        let pool_size = worker_count * POOL_FACTOR;

        let hashers = HasherPool::new(worker_count)?;
        let progress = ProgressBar::new(block_count, "Signing...")?;

        let buffers = Arc::new(BufferPool::new(pool_size, block_size));
        let ring = Arc::new(OutputRing::new(block_count));
        let (block_tx, block_rx) = flume::bounded(pool_size);

        let reader = Reader::new(block_size, file_size, block_count);
        let reader_handle = thread::spawn({
            let buffers = Arc::clone(&buffers);
            let ring = Arc::clone(&ring);
            // block_tx moves in and drops on return, closing the queue.
            move || {
                if let Err(e) = reader.read_blocks(input, &buffers, &block_tx, &ring) {
                    ring.fail(e);
                }
            }
        });

        let hasher_handle = thread::spawn({
            let buffers = Arc::clone(&buffers);
            let ring = Arc::clone(&ring);
            move || hashers.run(&block_rx, &buffers, &ring)
        });

        let writer = Writer::new(block_count);
        if let Err(e) = writer.write_all(output, &ring, Some(&progress)) {
            ring.fail(e);
        }

        if reader_handle.join().is_err() {
            ring.fail(SignatureError::internal("reader thread panicked"));
        }
        if hasher_handle.join().is_err() {
            ring.fail(SignatureError::internal("hasher pool panicked"));
        }

        match ring.take_error() {
            Some(error) => {
                progress.abandon();
                Err(error)
            }
            None => {
                progress.finish();
                Ok(())
            }
        }
    }
}

/// `max(1, cores - 2)`: two cores stay reserved for the reader and the
/// writer. Falls back to four cores when the OS reports nothing.
fn default_worker_count() -> usize {
    let cores = thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(FALLBACK_CORES);
    cores.saturating_sub(RESERVED_CORES).max(1)
}
