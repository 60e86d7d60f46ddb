//! Quality filtering pipeline for alignment block streams
//!
//! This module implements the sliding-window quality filter: blocks are
//! pulled from an upstream source, scanned with a windowed mean over
//! per-column quality scores, and re-emitted split into sub-blocks with
//! low-quality spans removed.

pub mod iterator;
pub mod regions;
pub mod splitter;
pub mod window;

pub use iterator::QualityFilterStream;
pub use regions::merge_bad_windows;
pub use splitter::split_block;
pub use window::SlidingWindowEvaluator;

use crate::error::{MafCleanError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the quality filter, fixed for the stream's lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Species whose quality annotation must all be present for a block
    /// to be filtered; blocks missing any of them pass through as is.
    pub species: Vec<String>,
    /// Number of columns evaluated together
    pub window_size: usize,
    /// Slide increment between evaluated windows
    pub step: usize,
    /// Windows whose mean quality falls below this are flagged bad
    pub min_quality: f64,
    /// Retain discarded sub-blocks on a separate queue for inspection
    pub keep_trashed_blocks: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            species: Vec::new(),
            window_size: 10,
            step: 1,
            min_quality: 20.0,
            keep_trashed_blocks: false,
        }
    }
}

impl FilterConfig {
    /// Rejects misconfiguration before any block is pulled.
    pub fn validate(&self) -> Result<()> {
        if self.species.is_empty() {
            return Err(MafCleanError::config(
                "at least one species is required for quality filtering",
            ));
        }
        if self.window_size == 0 {
            return Err(MafCleanError::config("window_size must be positive"));
        }
        if self.step == 0 {
            return Err(MafCleanError::config("step must be positive"));
        }
        Ok(())
    }
}

/// Running counters kept by the filter stream, for diagnostics only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Blocks pulled from upstream
    pub blocks_in: u64,
    /// Blocks delivered unfiltered (missing annotation or too narrow)
    pub passed_through: u64,
    /// Blocks found clean and delivered unchanged
    pub kept_whole: u64,
    /// Blocks split into at least one kept and one removed span
    pub split: u64,
    /// Blocks whose every column was removed
    pub fully_removed: u64,
    /// Kept sub-blocks emitted from split blocks
    pub sub_blocks_out: u64,
    /// Discarded units queued (only counted when retention is enabled)
    pub trashed: u64,
}
