//! Streaming quality filter for multi-species alignment blocks.
//!
//! Alignment data arrives as rectangular blocks: a fixed set of species,
//! each with one row of aligned symbols and optional per-column
//! annotation tracks such as sequencing quality. This crate provides
//! the block data model, a pull-based stream seam for chaining pipeline
//! stages, and a filtering stage that removes low-quality column spans:
//! a sliding window averages the quality scores of the required species,
//! contiguous bad windows merge into removal regions, and each block is
//! re-emitted split into its remaining good sub-blocks. Discarded spans
//! can be retained on a side queue for inspection.
//!
//! ```
//! use mafclean::block::{AlignmentBlock, AlignmentSequence, QUALITY_ANNOTATION};
//! use mafclean::filter::{FilterConfig, QualityFilterStream};
//! use mafclean::stream::{BlockSource, VecSource};
//!
//! # fn main() -> mafclean::error::Result<()> {
//! let mut block = AlignmentBlock::new(0.0, true);
//! let mut seq = AlignmentSequence::new("hg38", vec![b'A'; 6]);
//! seq.set_annotation(QUALITY_ANNOTATION, vec![40; 6])?;
//! block.push_sequence(seq)?;
//!
//! let config = FilterConfig {
//!     species: vec!["hg38".into()],
//!     window_size: 3,
//!     step: 1,
//!     min_quality: 20.0,
//!     keep_trashed_blocks: false,
//! };
//! let mut filtered = QualityFilterStream::new(VecSource::new([block]), config)?;
//! while let Some(block) = filtered.next_block()? {
//!     assert_eq!(block.width(), 6);
//! }
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod error;
pub mod filter;
pub mod stream;

pub use block::{AlignmentBlock, AlignmentSequence, NO_QUALITY, QUALITY_ANNOTATION};
pub use error::{MafCleanError, Result};
pub use filter::{FilterConfig, FilterStats, QualityFilterStream};
pub use stream::{BlockSource, Blocks, VecSource};
