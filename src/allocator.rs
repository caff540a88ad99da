//! Global memory allocator configuration.
//!
//! The pipeline recycles large block buffers across the reader and the
//! hasher threads. `mimalloc` handles that cross-thread churn with less
//! contention and fragmentation than the system allocator.

use mimalloc::MiMalloc;

/// The global allocator instance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
