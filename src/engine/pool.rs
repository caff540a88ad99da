//! Bounded pool of reusable block buffers.
//!
//! The pool is the engine's only back-pressure point: the reader must
//! acquire a buffer before it can read a block, so at most `pool_size`
//! blocks exist at any moment and peak memory stays at
//! `pool_size * block_size` no matter how large the input is.

use flume::{Receiver, Sender, TrySendError};

use crate::error::SignatureError;

/// A fixed set of recycled `block_size`-length buffers.
///
/// Implemented as a bounded channel pre-seeded with every buffer: a
/// blocking `recv` is the counting semaphore, a `try_send` the release.
/// The pool holds both endpoints, so the channel never disconnects
/// while the pool is alive.
pub struct BufferPool {
    free: Receiver<Vec<u8>>,
    slots: Sender<Vec<u8>>,
}

impl BufferPool {
    /// Allocates `pool_size` zeroed buffers of `block_size` bytes.
    #[must_use]
    pub fn new(pool_size: usize, block_size: usize) -> Self {
        let (slots, free) = flume::bounded(pool_size);
        for _ in 0..pool_size {
            slots.send(vec![0u8; block_size]).expect("pool channel sized to hold every buffer");
        }
        Self { free, slots }
    }

    /// Takes a free buffer, blocking until one is returned.
    pub fn acquire(&self) -> Result<Vec<u8>, SignatureError> {
        self.free.recv().map_err(|_| SignatureError::internal("buffer pool disconnected during acquire"))
    }

    /// Returns a buffer to the free set. Never blocks.
    ///
    /// Only buffers handed out by [`acquire`](Self::acquire) may come
    /// back; a foreign buffer overflows the channel and reports the
    /// invariant violation instead of growing the pool.
    pub fn release(&self, buffer: Vec<u8>) -> Result<(), SignatureError> {
        match self.slots.try_send(buffer) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SignatureError::internal("buffer released into a full pool")),
            Err(TrySendError::Disconnected(_)) => Err(SignatureError::internal("buffer pool disconnected during release")),
        }
    }
}
