//! Engine tuning constants.
//!
//! Everything that shapes the pipeline's footprint lives here: digest
//! width, the buffer-pool sizing factor, the thread reservation for the
//! reader and writer, and the global memory ceiling that refuses
//! configurations which would balloon the buffer pool.

/// Width of a single block digest in bytes (SHA-256 output).
pub const DIGEST_SIZE: usize = 32;

/// One kibibyte. The CLI expresses block sizes in KiB.
pub const KIB: u64 = 1024;

/// Default block size in KiB when `--block` is not given (1 MiB).
pub const DEFAULT_BLOCK_KIB: u64 = 1024;

/// Buffers kept in flight per hasher worker.
///
/// The pool holds `worker_count * POOL_FACTOR` buffers so every worker
/// can hold a block while the reader fills the next wave. Must stay
/// >= 1 or the pipeline serializes on the pool.
pub const POOL_FACTOR: usize = 4;

/// Cores reserved for the reader and writer threads.
pub const RESERVED_CORES: usize = 2;

/// Assumed core count when the OS does not report one.
pub const FALLBACK_CORES: usize = 4;

/// Upper bound on `pool_size * block_size` (1.5 GiB).
///
/// Construction fails when the buffer pool would exceed this, so an
/// oversized `--block` cannot turn into an allocation bomb.
pub const MEMORY_CEILING: u64 = 1536 * 1024 * 1024;
