//! Progress bar visualization.
//!
//! Wraps the `indicatif` library so the writer can report one tick per
//! digest without knowing anything about terminal rendering.

use indicatif::{ProgressBar as Bar, ProgressStyle as Style};

use crate::error::SignatureError;

/// The template string defining the look of the progress bar.
///
/// Format: `[Spinner] [Message] [Bar] [Percent] (Blocks, ETA)`
const PROGRESS_TEMPLATE: &str = "{spinner:.green} {msg} [{bar:40.cyan/blue}] {percent}% ({pos}/{len} blocks, {eta})";

/// A wrapper around the `indicatif` progress bar, one unit per block.
pub struct ProgressBar {
    bar: Bar,
}

impl ProgressBar {
    /// Creates and configures a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `total_blocks` - Total number of digests the writer will emit.
    /// * `description` - The label to display (e.g., "Signing...").
    pub fn new(total_blocks: u64, description: &str) -> Result<Self, SignatureError> {
        let style = Style::with_template(PROGRESS_TEMPLATE)
            .map_err(|e| SignatureError::internal(format!("invalid progress template: {e}")))?;

        let bar = Bar::new(total_blocks);
        bar.set_style(style.progress_chars("●○ "));
        bar.set_message(description.to_owned());

        Ok(Self { bar })
    }

    /// Advances the bar by `delta` blocks.
    #[inline]
    pub fn add(&self, delta: u64) {
        self.bar.inc(delta)
    }

    /// Marks the bar as finished.
    #[inline]
    pub fn finish(&self) {
        self.bar.finish()
    }

    /// Freezes the bar where it is, for failed runs.
    #[inline]
    pub fn abandon(&self) {
        self.bar.abandon()
    }
}
