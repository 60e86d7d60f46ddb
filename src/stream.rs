//! Pull-based block streams
//!
//! Pipeline stages share one seam: a source that hands over the next
//! alignment block, or signals end of stream. Stages compose
//! decorator-style by owning their upstream source behind this trait;
//! blocks move on every hand-off, so no stage ever aliases another's
//! data.

use crate::block::AlignmentBlock;
use crate::error::Result;
use std::collections::VecDeque;

/// A pull-based producer of alignment blocks.
///
/// `Ok(None)` signals a clean end of stream and must be stable: once
/// returned with no buffered data left, every later call returns it
/// again.
pub trait BlockSource {
    fn next_block(&mut self) -> Result<Option<AlignmentBlock>>;
}

/// In-memory source backed by a queue of pre-built blocks.
///
/// Used by tests and by callers that materialize blocks up front.
pub struct VecSource {
    blocks: VecDeque<AlignmentBlock>,
}

impl VecSource {
    pub fn new(blocks: impl IntoIterator<Item = AlignmentBlock>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
        }
    }
}

impl BlockSource for VecSource {
    fn next_block(&mut self) -> Result<Option<AlignmentBlock>> {
        Ok(self.blocks.pop_front())
    }
}

/// Adapter exposing any `BlockSource` as a standard fallible iterator.
pub struct Blocks<S: BlockSource> {
    source: S,
}

impl<S: BlockSource> Blocks<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Hands back the wrapped source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: BlockSource> Iterator for Blocks<S> {
    type Item = Result<AlignmentBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.next_block().transpose()
    }
}
