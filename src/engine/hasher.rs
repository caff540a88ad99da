use flume::Receiver;
use rayon::prelude::*;
use sha2::{Digest as _, Sha256};

use crate::engine::pool::BufferPool;
use crate::engine::ring::OutputRing;
use crate::error::SignatureError;
use crate::types::{Block, Digest};

/// Parallel SHA-256 workers over the block queue.
pub struct HasherPool {
    pool: rayon::ThreadPool,
}

impl HasherPool {
    /// Builds a dedicated pool with exactly `worker_count` threads.
    pub fn new(worker_count: usize) -> Result<Self, SignatureError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("hasher-{i}"))
            .build()
            .map_err(|e| SignatureError::internal(format!("failed to build hasher pool: {e}")))?;
        Ok(Self { pool })
    }

    /// Drains the queue until it is closed and empty.
    ///
    /// Workers coordinate through nothing but the queue, the ring slot
    /// they own, and the buffer pool: each block's digest is published
    /// before its buffer goes back to the pool, so the reader can never
    /// reuse bytes a hasher is still digesting.
    pub fn run(&self, blocks: &Receiver<Block>, buffers: &BufferPool, ring: &OutputRing) {
        self.pool.install(|| {
            blocks.iter().par_bridge().for_each(|block| {
                ring.publish(block.index, hash_block(&block.data));

                if let Err(e) = buffers.release(block.data) {
                    ring.fail(e);
                }
            });
        });
    }
}

/// SHA-256 over the full (padded) block.
fn hash_block(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_hash_block_matches_sha256() {
        let expected: Digest = Sha256::digest(b"hello world").into();
        assert_eq!(hash_block(b"hello world"), expected);
    }

    #[test]
    fn test_workers_drain_queue_and_recycle_buffers() {
        let pool = Arc::new(BufferPool::new(4, 8));
        let ring = Arc::new(OutputRing::new(4));
        let (tx, rx) = flume::bounded(4);

        for index in 0..4u64 {
            let mut data = pool.acquire().unwrap();
            data.fill(index as u8);
            tx.send(Block::new(index, data)).unwrap();
        }
        drop(tx);

        HasherPool::new(2).unwrap().run(&rx, &pool, &ring);

        for index in 0..4u64 {
            let expected: Digest = Sha256::digest([index as u8; 8]).into();
            assert_eq!(ring.wait_take(index), Some(expected));
        }

        // Every buffer came back to the pool.
        for _ in 0..4 {
            pool.acquire().unwrap();
        }
        assert!(!ring.has_failed());
    }
}
