//! Line ranges and the four range relations the conflict engine is built on

use serde::{Deserialize, Serialize};

/// A closed, inclusive, 1-indexed line interval.
///
/// Invariant: `start <= end`. The constructor normalizes reversed endpoints
/// rather than rejecting them; upstream analyzers are trusted but malformed
/// ranges are treated permissively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a range covering `[start, end]`, swapping reversed endpoints
    pub fn new(start: u32, end: u32) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Create a range covering a single line
    pub fn single(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Number of lines covered (always at least one)
    pub fn line_count(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Whether the two ranges share at least one line (symmetric)
    pub fn overlaps(&self, other: &LineRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Whether `self` fully contains `other` (a range contains itself)
    pub fn contains(&self, other: &LineRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether the ranges touch without sharing a line (symmetric).
    ///
    /// Mutually exclusive with [`overlaps`](Self::overlaps): the classifier
    /// only checks adjacency once overlap has been ruled out.
    pub fn is_adjacent_to(&self, other: &LineRange) -> bool {
        self.end.checked_add(1) == Some(other.start) || other.end.checked_add(1) == Some(self.start)
    }

    /// Smallest range covering both
    pub fn union(&self, other: &LineRange) -> LineRange {
        LineRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "line {}", self.start)
        } else {
            write!(f, "lines {}-{}", self.start, self.end)
        }
    }
}
