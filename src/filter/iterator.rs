//! Streaming orchestrator for the quality filter
//!
//! `QualityFilterStream` wraps an upstream `BlockSource` and exposes
//! the same pull contract, so filter stages chain like any other stage.
//! Each upstream block is scanned, its low-quality regions merged, and
//! the block re-emitted as zero or more kept sub-blocks; discarded
//! spans are queued separately when retention is enabled.

use crate::block::{AlignmentBlock, QUALITY_ANNOTATION};
use crate::error::Result;
use crate::filter::{
    FilterConfig, FilterStats, SlidingWindowEvaluator, merge_bad_windows, split_block,
};
use crate::stream::BlockSource;
use std::collections::VecDeque;
use std::io::Write;
use std::ops::Range;
use tracing::debug;

/// Outcome of scanning one block, computed before any buffer is touched
/// so borrows of the block end before it moves.
enum Scan {
    MissingQuality,
    TooNarrow,
    Regions(Vec<Range<usize>>),
}

/// Sliding-window quality filter over a stream of alignment blocks.
///
/// Configuration is fixed at construction; misconfiguration is rejected
/// there rather than surfacing mid-stream. One instance serves one
/// upstream stream and is driven from a single thread.
pub struct QualityFilterStream<S: BlockSource> {
    source: S,
    config: FilterConfig,
    evaluator: SlidingWindowEvaluator,
    delivery: VecDeque<AlignmentBlock>,
    trash: VecDeque<AlignmentBlock>,
    sink: Option<Box<dyn Write + Send>>,
    stats: FilterStats,
}

impl<S: BlockSource> QualityFilterStream<S> {
    pub fn new(source: S, config: FilterConfig) -> Result<Self> {
        config.validate()?;
        let evaluator =
            SlidingWindowEvaluator::new(config.window_size, config.step, config.min_quality);
        Ok(Self {
            source,
            config,
            evaluator,
            delivery: VecDeque::new(),
            trash: VecDeque::new(),
            sink: None,
            stats: FilterStats::default(),
        })
    }

    /// Attaches a diagnostic sink receiving human-readable advisory
    /// lines. Observational only; sink failures never affect filtering.
    pub fn with_diagnostic_sink(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Running counters, for diagnostics
    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// Hands over the queued discarded blocks. Empty unless
    /// `keep_trashed_blocks` was enabled.
    pub fn drain_trashed(&mut self) -> Vec<AlignmentBlock> {
        self.trash.drain(..).collect()
    }

    fn advise(&mut self, line: &str) {
        debug!("{line}");
        if let Some(sink) = &mut self.sink {
            let _ = writeln!(sink, "QUAL CLEANER: {line}");
        }
    }

    fn scan(&mut self, block: &AlignmentBlock) -> Scan {
        let rows: Vec<&[i32]> = self
            .config
            .species
            .iter()
            .filter_map(|sp| block.sequence_for_species(sp))
            .filter_map(|seq| seq.annotation(QUALITY_ANNOTATION))
            .collect();
        if rows.len() != self.config.species.len() {
            return Scan::MissingQuality;
        }
        if block.width() < self.config.window_size {
            return Scan::TooNarrow;
        }
        Scan::Regions(merge_bad_windows(&self.evaluator.scan(&rows)))
    }

    fn process(&mut self, block: AlignmentBlock) -> Result<()> {
        let width = block.width();
        match self.scan(&block) {
            Scan::MissingQuality => {
                self.advise(
                    "block is missing quality scores for at least one species \
                     and will therefore not be filtered",
                );
                self.stats.passed_through += 1;
                self.delivery.push_back(block);
            }
            Scan::TooNarrow => {
                self.advise(&format!(
                    "block of size {width} is narrower than the window and will not be filtered"
                ));
                self.stats.passed_through += 1;
                self.delivery.push_back(block);
            }
            Scan::Regions(regions) if regions.is_empty() => {
                self.advise("block is clean and kept as is");
                self.stats.kept_whole += 1;
                self.delivery.push_back(block);
            }
            Scan::Regions(regions)
                if regions.len() == 1 && regions[0].start == 0 && regions[0].end == width =>
            {
                self.advise("block was entirely removed");
                self.stats.fully_removed += 1;
                if self.config.keep_trashed_blocks {
                    self.stats.trashed += 1;
                    self.trash.push_back(block);
                }
            }
            Scan::Regions(regions) => {
                for region in &regions {
                    self.advise(&format!(
                        "removing region ({}, {}) from block",
                        region.start, region.end
                    ));
                }
                let outcome = split_block(block, &regions, self.config.keep_trashed_blocks)?;
                self.advise(&format!(
                    "block of size {width} split into {} parts",
                    outcome.kept.len()
                ));
                self.stats.split += 1;
                self.stats.sub_blocks_out += outcome.kept.len() as u64;
                self.stats.trashed += outcome.trashed.len() as u64;
                self.delivery.extend(outcome.kept);
                self.trash.extend(outcome.trashed);
            }
        }
        Ok(())
    }
}

impl<S: BlockSource> BlockSource for QualityFilterStream<S> {
    /// Pulls upstream until something is deliverable or upstream is
    /// exhausted. A fully discarded block never produces a premature
    /// end-of-stream while upstream still has data.
    fn next_block(&mut self) -> Result<Option<AlignmentBlock>> {
        while self.delivery.is_empty() {
            match self.source.next_block()? {
                Some(block) => {
                    self.stats.blocks_in += 1;
                    self.process(block)?;
                }
                None => return Ok(None),
            }
        }
        Ok(self.delivery.pop_front())
    }
}
