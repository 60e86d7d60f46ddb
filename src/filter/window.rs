//! Sliding-window quality evaluation
//!
//! Scans the quality rows of one block with a fixed-size window and
//! flags windows whose mean quality falls below the configured
//! threshold. The window is a FIFO ring of column vectors (one value
//! per species); sliding pushes the newest columns and evicts the same
//! number of oldest ones.

use std::collections::VecDeque;
use std::ops::Range;
use tracing::trace;

/// Windowed mean evaluator over per-species quality rows.
///
/// Created fresh per block scan; `scan` resets internal state, so one
/// evaluator may be reused across blocks of differing widths.
pub struct SlidingWindowEvaluator {
    window_size: usize,
    step: usize,
    min_quality: f64,
    window: VecDeque<Vec<i32>>,
}

impl SlidingWindowEvaluator {
    /// Both `window_size` and `step` must be positive; the stream
    /// config validates that before an evaluator is ever built.
    pub fn new(window_size: usize, step: usize, min_quality: f64) -> Self {
        Self {
            window_size,
            step,
            min_quality,
            window: VecDeque::with_capacity(window_size),
        }
    }

    /// Scans `rows` (one quality slice per species, all the same width)
    /// and returns the bad windows as half-open column ranges, in
    /// increasing start order.
    ///
    /// Windows start at multiples of `step`; the rightmost window
    /// `[width - window_size, width)` is evaluated once more afterwards
    /// when the stride does not land on it exactly, so trailing columns
    /// are never left unscanned. Requires `window_size <= width`.
    pub fn scan(&mut self, rows: &[&[i32]]) -> Vec<Range<usize>> {
        let width = rows.first().map_or(0, |r| r.len());
        debug_assert!(self.window_size <= width);
        debug_assert!(rows.iter().all(|r| r.len() == width));

        self.window.clear();
        for col in 0..self.window_size {
            self.window.push_back(column(rows, col));
        }

        let mut bad = Vec::new();
        let mut start = 0;
        loop {
            if self.current_window_is_bad() {
                trace!(start, end = start + self.window_size, "window flagged bad");
                bad.push(start..start + self.window_size);
            }
            if start + self.step + self.window_size <= width {
                self.slide(rows, start + self.window_size, self.step);
                start += self.step;
            } else {
                break;
            }
        }

        // The stride may stop short of the block's right edge; evaluate
        // the true rightmost window once more so no column is skipped.
        let rightmost = width - self.window_size;
        if rightmost > start {
            self.slide(rows, start + self.window_size, rightmost - start);
            if self.current_window_is_bad() {
                trace!(start = rightmost, end = width, "window flagged bad");
                bad.push(rightmost..width);
            }
        }

        bad
    }

    /// Pushes `count` columns starting at `from`, evicting as many of
    /// the oldest, keeping the ring at fixed capacity.
    fn slide(&mut self, rows: &[&[i32]], from: usize, count: usize) {
        for col in from..from + count {
            self.window.push_back(column(rows, col));
            self.window.pop_front();
        }
    }

    /// A window is bad iff it has at least one measured cell and the
    /// mean over measured cells falls below the threshold. Values above
    /// zero contribute themselves, other present values contribute 0,
    /// and the -1 sentinel is excluded from the denominator entirely.
    fn current_window_is_bad(&self) -> bool {
        let mut sum = 0.0;
        let mut n = (self.window.len() * self.window.front().map_or(0, |c| c.len())) as f64;
        for col in &self.window {
            for &value in col {
                if value > 0 {
                    sum += f64::from(value);
                }
                if value == crate::block::NO_QUALITY {
                    n -= 1.0;
                }
            }
        }
        n > 0.0 && sum / n < self.min_quality
    }
}

fn column(rows: &[&[i32]], col: usize) -> Vec<i32> {
    rows.iter().map(|r| r[col]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::NO_QUALITY;

    fn scan(ws: usize, step: usize, min: f64, rows: &[&[i32]]) -> Vec<Range<usize>> {
        SlidingWindowEvaluator::new(ws, step, min).scan(rows)
    }

    #[test]
    fn test_clean_rows_flag_nothing() {
        let a = [30; 12];
        let b = [25; 12];
        assert!(scan(4, 1, 20.0, &[&a, &b]).is_empty());
    }

    #[test]
    fn test_low_quality_run_flagged() {
        let a = [2, 2, 2, 40, 40, 40, 40, 2, 2, 2];
        let b = a;
        let bad = scan(3, 1, 10.0, &[&a, &b]);
        assert_eq!(bad, vec![0..3, 7..10]);
    }

    #[test]
    fn test_rightmost_window_not_skipped() {
        // With step 4 the strided scan stops at start 4; the trailing
        // low-quality columns are only covered by the extra rightmost
        // window [6, 10).
        let a = [30, 30, 30, 30, 30, 30, 1, 1, 1, 1];
        let bad = scan(4, 4, 10.0, &[&a]);
        assert_eq!(bad, vec![6..10]);
    }

    #[test]
    fn test_exact_stride_evaluates_once() {
        // width 10, ws 4, step 3: windows at 0, 3, 6 — 6 is exactly the
        // rightmost, so no duplicate evaluation.
        let a = [1; 10];
        let bad = scan(4, 3, 10.0, &[&a]);
        assert_eq!(bad, vec![0..4, 3..7, 6..10]);
    }

    #[test]
    fn test_all_sentinel_window_not_flagged() {
        let a = [NO_QUALITY; 6];
        let b = [NO_QUALITY; 6];
        assert!(scan(3, 1, 1000.0, &[&a, &b]).is_empty());
    }

    #[test]
    fn test_sentinel_excluded_from_denominator() {
        // One species measured at 30, the other all missing: the mean
        // is 30 over the measured cells only, so nothing is flagged.
        let a = [30, 30, 30, 30];
        let b = [NO_QUALITY; 4];
        assert!(scan(4, 1, 20.0, &[&a, &b]).is_empty());

        // If missing cells were counted the mean would be 15 < 20.
        let bad = scan(4, 1, 31.0, &[&a, &b]);
        assert_eq!(bad, vec![0..4]);
    }

    #[test]
    fn test_zero_and_negative_count_as_present_zero() {
        // Zeros are present data contributing 0: mean 0 < threshold.
        let a = [0, 0, 0, 0];
        assert_eq!(scan(4, 1, 5.0, &[&a]), vec![0..4]);

        // A stray negative other than -1 behaves like 0.
        let a = [-7, 40, 40, 40];
        let bad = scan(4, 1, 31.0, &[&a]);
        assert_eq!(bad, vec![0..4]);
    }

    #[test]
    fn test_window_equal_to_width() {
        let a = [5, 5, 5];
        assert_eq!(scan(3, 1, 10.0, &[&a]), vec![0..3]);
    }
}
