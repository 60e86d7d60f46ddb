//! Alignment block data model
//!
//! This module provides the in-memory representation of multi-species
//! alignment blocks: rectangular sets of aligned columns with per-column
//! annotation tracks attached to each sequence. Blocks are move-only;
//! every pipeline hand-off transfers ownership.

use crate::error::{MafCleanError, Result};
use std::collections::BTreeMap;

/// Reserved annotation kind carrying per-column quality scores
pub const QUALITY_ANNOTATION: &str = "quality";

/// Sentinel quality value meaning "no measurement at this column"
pub const NO_QUALITY: i32 = -1;

/// One aligned sequence: a species name, its row of aligned symbols,
/// and zero or more named per-column annotation tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentSequence {
    species: String,
    symbols: Vec<u8>,
    annotations: BTreeMap<String, Vec<i32>>,
}

impl AlignmentSequence {
    pub fn new(species: impl Into<String>, symbols: Vec<u8>) -> Self {
        Self {
            species: species.into(),
            symbols,
            annotations: BTreeMap::new(),
        }
    }

    /// Species/taxon identifier this row belongs to
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Number of aligned columns
    pub fn width(&self) -> usize {
        self.symbols.len()
    }

    /// Aligned symbols, one per column
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Attaches a named annotation track. The track must have one value
    /// per aligned column.
    pub fn set_annotation(&mut self, kind: impl Into<String>, values: Vec<i32>) -> Result<()> {
        let kind = kind.into();
        if values.len() != self.symbols.len() {
            return Err(MafCleanError::annotation_length(
                kind,
                values.len(),
                self.symbols.len(),
            ));
        }
        self.annotations.insert(kind, values);
        Ok(())
    }

    /// Capability-checked annotation lookup
    pub fn annotation(&self, kind: &str) -> Option<&[i32]> {
        self.annotations.get(kind).map(|v| v.as_slice())
    }

    pub fn has_annotation(&self, kind: &str) -> bool {
        self.annotations.contains_key(kind)
    }

    /// Extracts a contiguous sub-range of columns as a new sequence.
    /// Every annotation track is sliced identically, so the width
    /// invariant holds on the result.
    pub fn sub_sequence(&self, start: usize, len: usize) -> Result<AlignmentSequence> {
        let end = start
            .checked_add(len)
            .ok_or_else(|| MafCleanError::invalid_range(start, usize::MAX, self.width()))?;
        if end > self.width() {
            return Err(MafCleanError::invalid_range(start, end, self.width()));
        }
        let annotations = self
            .annotations
            .iter()
            .map(|(kind, values)| (kind.clone(), values[start..end].to_vec()))
            .collect();
        Ok(AlignmentSequence {
            species: self.species.clone(),
            symbols: self.symbols[start..end].to_vec(),
            annotations,
        })
    }
}

/// A rectangular alignment block: an ordered set of sequences sharing
/// one width, plus a score and a pass/strand flag inherited by every
/// sub-block derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentBlock {
    sequences: Vec<AlignmentSequence>,
    score: f64,
    pass: bool,
}

impl AlignmentBlock {
    pub fn new(score: f64, pass: bool) -> Self {
        Self {
            sequences: Vec::new(),
            score,
            pass,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn pass(&self) -> bool {
        self.pass
    }

    /// Number of aligned columns; 0 for a block with no sequences yet
    pub fn width(&self) -> usize {
        self.sequences.first().map_or(0, |s| s.width())
    }

    pub fn sequences(&self) -> &[AlignmentSequence] {
        &self.sequences
    }

    /// Adds a sequence, enforcing the uniform-width invariant.
    pub fn push_sequence(&mut self, seq: AlignmentSequence) -> Result<()> {
        if let Some(first) = self.sequences.first() {
            if seq.width() != first.width() {
                return Err(MafCleanError::width_mismatch(
                    seq.species(),
                    seq.width(),
                    first.width(),
                ));
            }
        }
        self.sequences.push(seq);
        Ok(())
    }

    /// Looks up the row for a given species, if present.
    pub fn sequence_for_species(&self, species: &str) -> Option<&AlignmentSequence> {
        self.sequences.iter().find(|s| s.species() == species)
    }

    /// Extracts a sub-block covering `len` columns starting at `start`.
    /// Score and pass flag carry over unchanged; every member sequence
    /// and its annotations are sliced identically.
    pub fn sub_block(&self, start: usize, len: usize) -> Result<AlignmentBlock> {
        let mut sequences = Vec::with_capacity(self.sequences.len());
        for seq in &self.sequences {
            sequences.push(seq.sub_sequence(start, len)?);
        }
        Ok(AlignmentBlock {
            sequences,
            score: self.score,
            pass: self.pass,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq_with_quality(species: &str, width: usize, quality: Vec<i32>) -> AlignmentSequence {
        let mut seq = AlignmentSequence::new(species, vec![b'A'; width]);
        seq.set_annotation(QUALITY_ANNOTATION, quality).unwrap();
        seq
    }

    #[test]
    fn test_annotation_length_enforced() {
        let mut seq = AlignmentSequence::new("hg38", vec![b'A'; 4]);
        let err = seq
            .set_annotation(QUALITY_ANNOTATION, vec![10, 20, 30])
            .unwrap_err();
        match err {
            MafCleanError::AnnotationLength { got: 3, want: 4, .. } => (),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!seq.has_annotation(QUALITY_ANNOTATION));
    }

    #[test]
    fn test_sub_sequence_slices_annotations() {
        let seq = seq_with_quality("hg38", 5, vec![1, 2, 3, 4, 5]);
        let sub = seq.sub_sequence(1, 3).unwrap();
        assert_eq!(sub.width(), 3);
        assert_eq!(sub.annotation(QUALITY_ANNOTATION), Some(&[2, 3, 4][..]));
        assert_eq!(sub.species(), "hg38");
    }

    #[test]
    fn test_sub_sequence_out_of_range() {
        let seq = seq_with_quality("hg38", 5, vec![1, 2, 3, 4, 5]);
        assert!(seq.sub_sequence(3, 3).is_err());
        assert!(seq.sub_sequence(5, 0).is_ok());
    }

    #[test]
    fn test_block_width_uniformity() {
        let mut block = AlignmentBlock::new(12.5, true);
        block
            .push_sequence(AlignmentSequence::new("hg38", vec![b'A'; 6]))
            .unwrap();
        let err = block
            .push_sequence(AlignmentSequence::new("mm10", vec![b'C'; 5]))
            .unwrap_err();
        match err {
            MafCleanError::WidthMismatch { got: 5, want: 6, .. } => (),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(block.width(), 6);
    }

    #[test]
    fn test_sub_block_preserves_metadata() {
        let mut block = AlignmentBlock::new(-3.0, false);
        block
            .push_sequence(seq_with_quality("hg38", 4, vec![9, 8, 7, 6]))
            .unwrap();
        block
            .push_sequence(seq_with_quality("mm10", 4, vec![0, NO_QUALITY, 2, 3]))
            .unwrap();

        let sub = block.sub_block(1, 2).unwrap();
        assert_eq!(sub.width(), 2);
        assert_eq!(sub.score(), -3.0);
        assert!(!sub.pass());
        assert_eq!(
            sub.sequence_for_species("mm10")
                .unwrap()
                .annotation(QUALITY_ANNOTATION),
            Some(&[NO_QUALITY, 2][..])
        );
    }
}
