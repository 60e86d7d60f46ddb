//! Merging bad windows into disjoint removal regions

use std::ops::Range;

/// Collapses bad windows, given in increasing start order, into the
/// minimal ordered list of disjoint half-open column regions.
///
/// A window whose start lies at or before the open region's end extends
/// it (touching regions merge); anything further right closes the open
/// region and opens a new one. A single result spanning the whole block
/// width means the entire block is to be discarded.
pub fn merge_bad_windows(windows: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut regions: Vec<Range<usize>> = Vec::new();
    for window in windows {
        match regions.last_mut() {
            Some(open) if window.start <= open.end => {
                open.end = open.end.max(window.end);
            }
            _ => regions.push(window.clone()),
        }
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(merge_bad_windows(&[]).is_empty());
    }

    #[test]
    fn test_overlapping_windows_merge() {
        assert_eq!(merge_bad_windows(&[0..5, 3..8]), vec![0..8]);
    }

    #[test]
    fn test_touching_windows_merge() {
        assert_eq!(merge_bad_windows(&[0..4, 4..8]), vec![0..8]);
    }

    #[test]
    fn test_disjoint_windows_stay_separate() {
        assert_eq!(merge_bad_windows(&[0..3, 5..8, 9..12]), vec![0..3, 5..8, 9..12]);
    }

    #[test]
    fn test_contained_window_does_not_shrink_region() {
        // The rightmost-window pass can emit a window nested inside the
        // previous one; the open region must keep its wider end.
        assert_eq!(merge_bad_windows(&[0..8, 2..6]), vec![0..8]);
    }

    #[test]
    fn test_chain_of_overlaps() {
        assert_eq!(merge_bad_windows(&[0..3, 1..4, 2..5, 7..9]), vec![0..5, 7..9]);
    }
}
