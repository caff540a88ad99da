//! Signature engine error types.

use std::io;

use thiserror::Error;

/// Errors produced by signature generation.
///
/// Pre-flight variants are raised from [`crate::engine::SignatureGenerator::new`]
/// before any thread is started; `Io` and `Internal` surface from
/// `generate` after the pipeline shuts down.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Input path is missing or not a regular file
    #[error("input file not found or not a regular file: {path}")]
    InputNotFound {
        /// Offending path
        path: String,
    },

    /// Output file cannot be created or truncated
    #[error("cannot create output file {path}: {source}")]
    OutputUnavailable {
        /// Offending path
        path: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Block size is zero or the buffer pool would exceed the memory ceiling
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Human-readable rejection reason
        reason: String,
    },

    /// Input file is zero bytes
    #[error("input file is empty: {path}")]
    EmptyInput {
        /// Offending path
        path: String,
    },

    /// Output filesystem cannot hold the signature
    #[error("not enough disk space for the signature: need {needed} bytes, {available} available")]
    InsufficientDiskSpace {
        /// Bytes the signature file will occupy
        needed: u64,
        /// Bytes available on the output filesystem
        available: u64,
    },

    /// Read or write failure while the pipeline is running
    #[error("{context}: {source}")]
    Io {
        /// What the engine was doing
        context: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Invariant violation inside the engine; indicates a bug
    #[error("internal engine error: {reason}")]
    Internal {
        /// Which invariant broke
        reason: String,
    },
}

impl SignatureError {
    /// Wraps a mid-run I/O failure with a short description of the
    /// operation that hit it.
    #[inline]
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    #[inline]
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal { reason: reason.into() }
    }

    /// Stable process exit code for this error kind.
    ///
    /// The mapping is part of the CLI contract; scripts may rely on it.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound { .. } => 2,
            Self::OutputUnavailable { .. } => 3,
            Self::InvalidParameter { .. } => 4,
            Self::EmptyInput { .. } => 5,
            Self::InsufficientDiskSpace { .. } => 6,
            Self::Io { .. } => 7,
            Self::Internal { .. } => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_stable() {
        let errors = [
            SignatureError::InputNotFound { path: "a".into() },
            SignatureError::OutputUnavailable { path: "b".into(), source: io::Error::other("x") },
            SignatureError::InvalidParameter { reason: "r".into() },
            SignatureError::EmptyInput { path: "c".into() },
            SignatureError::InsufficientDiskSpace { needed: 1, available: 0 },
            SignatureError::io("read", io::Error::other("x")),
            SignatureError::internal("bug"),
        ];

        let codes: Vec<i32> = errors.iter().map(SignatureError::exit_code).collect();
        assert_eq!(codes, vec![2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_io_helper_keeps_context() {
        let err = SignatureError::io("failed to read block", io::Error::other("boom"));
        assert_eq!(err.to_string(), "failed to read block: boom");
    }
}
