use std::io::Read;

use flume::Sender;

use crate::engine::pool::BufferPool;
use crate::engine::ring::OutputRing;
use crate::error::SignatureError;
use crate::types::Block;

/// Fills pool buffers from the input file in block order.
pub struct Reader {
    block_size: usize,
    file_size: u64,
    block_count: u64,
}

impl Reader {
    #[must_use]
    pub fn new(block_size: usize, file_size: u64, block_count: u64) -> Self {
        Self { block_size, file_size, block_count }
    }

    /// Reads every block, tagging each with its index.
    ///
    /// The final block of an uneven file is zero-padded to `block_size`
    /// so the signature is a deterministic function of the contents and
    /// the block size alone. Buffers come back from the pool dirty, so
    /// the reader zero-fills the remainder explicitly.
    ///
    /// Stops early (without error) once another thread has failed; the
    /// channel sender is dropped by the caller, which closes the queue.
    pub fn read_blocks<R: Read>(&self, mut input: R, pool: &BufferPool, blocks: &Sender<Block>, ring: &OutputRing) -> Result<(), SignatureError> {
        for index in 0..self.block_count {
            if ring.has_failed() {
                return Ok(());
            }

            let mut data = pool.acquire()?;
            let len = self.block_len(index);
            input
                .read_exact(&mut data[..len])
                .map_err(|e| SignatureError::io(format!("failed to read block {index}"), e))?;
            if len < self.block_size {
                data[len..].fill(0);
            }

            if blocks.send(Block::new(index, data)).is_err() {
                return Err(SignatureError::internal("block queue closed before reading finished"));
            }
        }

        Ok(())
    }

    /// Real bytes in block `index`; short only for the final block.
    fn block_len(&self, index: u64) -> usize {
        let offset = index * self.block_size as u64;
        let remaining = self.file_size - offset;
        remaining.min(self.block_size as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn run_reader(contents: &[u8], block_size: usize, pool_size: usize) -> Vec<Block> {
        let file_size = contents.len() as u64;
        let block_count = file_size.div_ceil(block_size as u64);
        let reader = Reader::new(block_size, file_size, block_count);

        let pool = Arc::new(BufferPool::new(pool_size, block_size));
        let ring = Arc::new(OutputRing::new(block_count));
        let (tx, rx) = flume::bounded(pool_size);

        let input = Cursor::new(contents.to_vec());
        let handle = {
            let pool = Arc::clone(&pool);
            let ring = Arc::clone(&ring);
            thread::spawn(move || reader.read_blocks(input, &pool, &tx, &ring))
        };

        // Drain while recycling buffers, the way the hashers do.
        let mut out = Vec::new();
        for block in rx.iter() {
            out.push(Block::new(block.index, block.data.clone()));
            pool.release(block.data).unwrap();
        }

        handle.join().unwrap().unwrap();
        out
    }

    #[test]
    fn test_exact_blocks_in_file_order() {
        let blocks = run_reader(&[0xAA; 32], 16, 2);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[1].index, 1);
        assert!(blocks.iter().all(|b| b.data == vec![0xAA; 16]));
    }

    #[test]
    fn test_tail_block_zero_padded() {
        let mut contents = vec![0xFF; 8];
        contents.extend_from_slice(b"xyz");
        let blocks = run_reader(&contents, 8, 2);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].data, vec![0xFF; 8]);
        assert_eq!(blocks[1].data, b"xyz\0\0\0\0\0");
    }

    #[test]
    fn test_recycled_buffer_is_repadded() {
        // A single-buffer pool forces the tail block to reuse the dirty
        // buffer that carried the all-0xFF first block.
        let mut contents = vec![0xFF; 8];
        contents.push(b'q');
        let blocks = run_reader(&contents, 8, 1);

        assert_eq!(blocks[1].data, b"q\0\0\0\0\0\0\0");
    }

    #[test]
    fn test_truncated_input_is_io_error() {
        let reader = Reader::new(8, 16, 2);
        let pool = BufferPool::new(2, 8);
        let ring = OutputRing::new(2);
        let (tx, _rx) = flume::bounded::<Block>(2);

        // Claims 16 bytes but only 10 exist.
        let input = Cursor::new(vec![0u8; 10]);
        let err = reader.read_blocks(input, &pool, &tx, &ring).unwrap_err();
        assert!(matches!(err, SignatureError::Io { .. }));
    }
}
