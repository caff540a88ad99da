use std::path::PathBuf;

use anyhow::{Context, Result};
use bytesize::ByteSize;
use clap::Parser;
use console::style;

use crate::config::{DEFAULT_BLOCK_KIB, KIB};
use crate::engine::SignatureGenerator;
use crate::error::SignatureError;

#[derive(Parser)]
#[command(
    name = "blocksig",
    version,
    about = "Generate a fixed-block SHA-256 signature of a file. Each block is hashed independently and the digests are written in block order."
)]
pub struct Cli {
    /// Input file path.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output signature file path (created or truncated).
    #[arg(short, long)]
    pub output: PathBuf,

    /// Block size in KiB.
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_KIB)]
    pub block: u64,
}

/// Exit code for a CLI failure.
///
/// Context wrappers change the outermost error type, so the engine
/// error has to be found by walking the whole chain; anything without a
/// [`SignatureError`] in it maps to the generic failure code.
#[must_use]
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error.chain().find_map(|cause| cause.downcast_ref::<SignatureError>()).map_or(1, SignatureError::exit_code)
}

impl Cli {
    #[inline]
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn execute(self) -> Result<()> {
        let block_size = self
            .block
            .checked_mul(KIB)
            .ok_or_else(|| SignatureError::InvalidParameter { reason: format!("block size of {} KiB overflows", self.block) })?;

        let generator = SignatureGenerator::new(&self.input, &self.output, block_size)?;
        let size = generator.file_size();
        let blocks = generator.block_count();
        let workers = generator.worker_count();

        generator.generate().with_context(|| format!("failed to sign {}", self.input.display()))?;

        println!(
            "{} Signature written: {} ({} in {} block(s), {} hasher(s))",
            style("✓").green(),
            self.output.display(),
            ByteSize(size),
            blocks,
            workers,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use anyhow::Context;

    use super::*;

    #[test]
    fn test_exit_code_survives_context_wrapping() {
        // execute() wraps generate() failures in with_context, which
        // buries the engine error one level down the chain.
        let wrapped: anyhow::Error = Err::<(), _>(SignatureError::io("failed to write digest for block 3", io::Error::other("disk full")))
            .with_context(|| "failed to sign input.bin".to_string())
            .unwrap_err();

        assert_eq!(exit_code(&wrapped), 7);
    }

    #[test]
    fn test_exit_code_for_bare_engine_error() {
        let bare = anyhow::Error::from(SignatureError::internal("buffer released into a full pool"));
        assert_eq!(exit_code(&bare), 8);
    }

    #[test]
    fn test_exit_code_falls_back_without_engine_error() {
        let foreign = anyhow::anyhow!("not an engine failure");
        assert_eq!(exit_code(&foreign), 1);
    }
}
