//! Splitting a block around its removal regions

use crate::block::AlignmentBlock;
use crate::error::Result;
use std::ops::Range;

/// The outcome of splitting one block around its bad regions.
#[derive(Debug)]
pub struct SplitOutcome {
    /// Kept sub-blocks in left-to-right column order
    pub kept: Vec<AlignmentBlock>,
    /// Discarded sub-blocks, populated only when retention is enabled
    pub trashed: Vec<AlignmentBlock>,
}

/// Partitions `block` around the disjoint, ordered `bad` regions.
///
/// With no bad regions the block is kept whole. When the single bad
/// region covers the full width, nothing is kept and — if retention is
/// on — the whole block becomes the one discarded unit. Otherwise each
/// maximal run of good columns becomes a kept sub-block and each bad
/// region a discarded one; every sub-block inherits the parent's score
/// and pass flag through `AlignmentBlock::sub_block`.
pub fn split_block(
    block: AlignmentBlock,
    bad: &[Range<usize>],
    keep_trashed: bool,
) -> Result<SplitOutcome> {
    let width = block.width();

    if bad.is_empty() {
        return Ok(SplitOutcome {
            kept: vec![block],
            trashed: Vec::new(),
        });
    }

    if bad.len() == 1 && bad[0].start == 0 && bad[0].end == width {
        return Ok(SplitOutcome {
            kept: Vec::new(),
            trashed: if keep_trashed { vec![block] } else { Vec::new() },
        });
    }

    let mut kept = Vec::with_capacity(bad.len() + 1);
    let mut trashed = Vec::new();
    let mut cursor = 0;
    for region in bad {
        if region.start > cursor {
            kept.push(block.sub_block(cursor, region.start - cursor)?);
        }
        if keep_trashed {
            trashed.push(block.sub_block(region.start, region.end - region.start)?);
        }
        cursor = region.end;
    }
    if cursor < width {
        kept.push(block.sub_block(cursor, width - cursor)?);
    }

    Ok(SplitOutcome { kept, trashed })
}
