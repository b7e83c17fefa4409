//! Integer span algebra over document offsets.
//!
//! A [`Span`] is a half-open interval `[start, end)` over one document's
//! character stream. Retrieved chunks and ground-truth references are both
//! expressed as spans in the same coordinate system, so relevance reduces
//! to interval arithmetic: pairwise [`Span::intersect`], overlap-merging
//! [`union`], set-minus-one-interval [`subtract`], and [`total_len`].
//!
//! # Design Philosophy: Parse, Don't Validate
//!
//! `start <= end` is checked once, in [`Span::new`]. Fields are private, so
//! downstream code can rely on the invariant without re-checking, and every
//! operation here preserves it.
//!
//! # Example
//!
//! ```rust
//! use spancov::span::{union, total_len, Span};
//!
//! let a = Span::new(0, 10)?;
//! let b = Span::new(5, 15)?;
//! assert_eq!(a.intersect(b), Some(Span::new(5, 10)?));
//!
//! // Touching spans merge: covered length is 15, not 20.
//! let merged = union(&[a, b]);
//! assert_eq!(merged, vec![Span::new(0, 15)?]);
//! assert_eq!(total_len(&merged), 15);
//! # Ok::<(), spancov::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` interval of offsets within one document.
///
/// Invariant: `start <= end`. Zero-length spans (`start == end`) are valid;
/// they contribute nothing to any length sum or intersection but still
/// occupy a slot in a retrieval list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpan`] when `start > end`. Malformed spans
    /// are a programming error and are never silently reordered.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_span(start, end));
        }
        Ok(Self { start, end })
    }

    /// Zero-length span at `at`.
    ///
    /// Used as the explicit stand-in for an unlocatable chunk: it keeps its
    /// slot in the retrieved list but adds nothing to any sum.
    #[must_use]
    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Internal constructor for spans whose invariant is already known.
    pub(crate) const fn from_raw(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Start offset (inclusive).
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of positions covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the span covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Intersection of two spans, or `None` when they are disjoint.
    ///
    /// An equal-boundary touch (`a.end == b.start`) is accepted as a valid
    /// zero-length intersection rather than `None`; callers summing lengths
    /// see no difference, but the distinction matters to [`union`] folding.
    #[must_use]
    pub fn intersect(self, other: Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Span { start, end })
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Merge a set of possibly-overlapping spans into a sorted, disjoint cover.
///
/// Sorts by start ascending, then folds left: the running span absorbs the
/// next one whenever `next.start <= running.end`, so overlapping *and*
/// touching spans both merge. The result is sorted, pairwise disjoint, and
/// non-touching, which makes it a valid input to [`total_len`].
///
/// Idempotent: `union(&union(spans)) == union(spans)`.
#[must_use]
pub fn union(spans: &[Span]) -> Vec<Span> {
    if spans.is_empty() {
        return Vec::new();
    }

    let mut sorted = spans.to_vec();
    sorted.sort_unstable();

    let mut merged = Vec::with_capacity(sorted.len());
    let mut running = sorted[0];
    for &span in &sorted[1..] {
        if span.start <= running.end {
            running.end = running.end.max(span.end);
        } else {
            merged.push(running);
            running = span;
        }
    }
    merged.push(running);
    merged
}

/// Remove the portion of each span that falls inside `target`.
///
/// Per input span: disjoint spans pass through unchanged, a strict superset
/// of `target` splits in two, a one-sided overlap is trimmed, and a span
/// fully inside `target` is dropped. Input spans are processed
/// independently; pass the output of [`union`] if a disjoint result is
/// required.
#[must_use]
pub fn subtract(spans: &[Span], target: Span) -> Vec<Span> {
    let mut result = Vec::new();
    for &span in spans {
        if span.end < target.start || span.start > target.end {
            result.push(span);
        } else if span.start < target.start && span.end > target.end {
            result.push(Span::from_raw(span.start, target.start));
            result.push(Span::from_raw(target.end, span.end));
        } else if span.start < target.start {
            result.push(Span::from_raw(span.start, target.start));
        } else if span.end > target.end {
            result.push(Span::from_raw(target.end, span.end));
        }
        // span fully inside target: removed
    }
    result
}

/// Sum of span lengths.
///
/// Counts every span independently, so this equals covered length only for
/// disjoint input. Run overlapping spans through [`union`] first when a true
/// coverage figure is needed.
#[must_use]
pub fn total_len(spans: &[Span]) -> usize {
    spans.iter().map(Span::len).sum()
}
