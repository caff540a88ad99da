//! Per-index digest slots and the engine's failure slot.
//!
//! Hashers finish in arbitrary order but the writer must emit digests
//! in strict block order. Instead of a priority queue, each block index
//! owns a slot in a flat vector: a hasher stores its digest under the
//! lock and signals the condvar, and the writer waits for exactly the
//! slot it needs next. The ring also carries the shared failure state:
//! the first thread to fail records its error here and wakes the
//! writer out of its wait.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::error::SignatureError;
use crate::types::Digest;

struct RingState {
    /// One slot per block, written exactly once by the owning hasher.
    slots: Vec<Option<Digest>>,
    /// Set once by the first failing thread; later errors are dropped.
    error: Option<SignatureError>,
    failed: bool,
}

pub struct OutputRing {
    state: Mutex<RingState>,
    ready: Condvar,
}

impl OutputRing {
    /// Allocates `block_count` empty slots.
    #[must_use]
    pub fn new(block_count: u64) -> Self {
        let state = RingState { slots: vec![None; block_count as usize], error: None, failed: false };
        Self { state: Mutex::new(state), ready: Condvar::new() }
    }

    fn lock(&self) -> MutexGuard<'_, RingState> {
        // A hasher that panicked mid-publish must not wedge the writer.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores the digest for `index` and wakes the writer.
    pub fn publish(&self, index: u64, digest: Digest) {
        let mut state = self.lock();
        debug_assert!(state.slots[index as usize].is_none(), "digest slot {index} published twice");
        state.slots[index as usize] = Some(digest);
        self.ready.notify_all();
    }

    /// Waits until the digest for `index` is ready and takes it.
    ///
    /// Returns `None` when the engine has failed; the error is already
    /// recorded and the caller should unwind without writing further.
    pub fn wait_take(&self, index: u64) -> Option<Digest> {
        let mut state = self.lock();
        loop {
            if state.failed {
                return None;
            }
            if let Some(digest) = state.slots[index as usize].take() {
                return Some(digest);
            }
            state = self.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Records a failure and wakes everyone. The first error wins.
    pub fn fail(&self, error: SignatureError) {
        let mut state = self.lock();
        if state.error.is_none() {
            state.error = Some(error);
        }
        state.failed = true;
        self.ready.notify_all();
    }

    /// True once any thread has failed; checked by the reader for
    /// cooperative shutdown.
    pub fn has_failed(&self) -> bool {
        self.lock().failed
    }

    /// Takes the recorded error after all threads have joined.
    pub fn take_error(&self) -> Option<SignatureError> {
        self.lock().error.take()
    }
}
