//! Core data types shared across the pipeline.
//!
//! A [`Block`] is the unit of work flowing from the reader to the hasher
//! pool; a [`Digest`] is the per-block result the writer emits. These
//! types are the common language between the engine stages.

use crate::config::DIGEST_SIZE;

/// SHA-256 output for a single block.
pub type Digest = [u8; DIGEST_SIZE];

/// A filled input block in flight between the reader and a hasher.
///
/// The buffer always has length `block_size`; the final block of the
/// file is zero-padded by the reader. The buffer is on loan from the
/// pool and must be returned once the digest is published.
pub struct Block {
    /// 0-based position of this block in the file.
    pub index: u64,

    /// The block bytes, exactly `block_size` long.
    pub data: Vec<u8>,
}

impl Block {
    #[inline]
    #[must_use]
    pub fn new(index: u64, data: Vec<u8>) -> Self {
        Self { index, data }
    }
}
