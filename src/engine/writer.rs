//! Ordered emission of block digests.
//!
//! The writer walks indices 0..block_count and waits on the ring for
//! each digest in turn, so output order is ascending by construction
//! and the only digests held in memory are the ones hashers finished
//! ahead of the current index.

use std::io::{BufWriter, Write};

use crate::engine::ring::OutputRing;
use crate::error::SignatureError;
use crate::ui::progress::ProgressBar;

pub struct Writer {
    block_count: u64,
}

impl Writer {
    #[inline]
    #[must_use]
    pub fn new(block_count: u64) -> Self {
        Self { block_count }
    }

    /// Drains the ring in ascending index order into `output`.
    ///
    /// Returns `Ok` without writing the remainder when the engine has
    /// failed elsewhere; the originating thread already recorded its
    /// error in the ring.
    pub fn write_all<W: Write>(&self, output: W, ring: &OutputRing, progress: Option<&ProgressBar>) -> Result<(), SignatureError> {
        let mut writer = BufWriter::new(output);

        for index in 0..self.block_count {
            let Some(digest) = ring.wait_take(index) else {
                return Ok(());
            };

            writer
                .write_all(&digest)
                .map_err(|e| SignatureError::io(format!("failed to write digest for block {index}"), e))?;

            if let Some(bar) = progress {
                bar.add(1);
            }
        }

        writer.flush().map_err(|e| SignatureError::io("failed to flush signature file", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_digests_in_ascending_order() {
        let ring = OutputRing::new(3);
        // Publish out of order; output must still be 0, 1, 2.
        ring.publish(1, [1u8; 32]);
        ring.publish(2, [2u8; 32]);
        ring.publish(0, [0u8; 32]);

        let mut output = Vec::new();
        Writer::new(3).write_all(&mut output, &ring, None).unwrap();

        assert_eq!(output.len(), 96);
        assert_eq!(&output[..32], &[0u8; 32]);
        assert_eq!(&output[32..64], &[1u8; 32]);
        assert_eq!(&output[64..], &[2u8; 32]);
    }

    #[test]
    fn test_stops_quietly_when_engine_failed() {
        let ring = OutputRing::new(2);
        ring.publish(0, [9u8; 32]);
        ring.fail(SignatureError::internal("reader died"));

        let mut output = Vec::new();
        Writer::new(2).write_all(&mut output, &ring, None).unwrap();

        // Nothing written past the failure; the error stays in the ring.
        assert!(output.is_empty());
        assert!(ring.take_error().is_some());
    }
}
