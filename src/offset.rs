//! Character-offset pairs and their ordering.
//!
//! Viewer coordinates are *character* offsets: stable integer positions a
//! human (or an annotation editor) counts, not byte positions. Rust string
//! slicing is byte-based, so this module also carries the char→byte
//! conversion used when extracting the text a span covers.
//!
//! # Ordering Contract
//!
//! [`Offsets`] orders by `start` ascending with `end` ascending as the
//! tie-break. That lexicographic pair ordering is the contract every
//! downstream sort and dedup relies on; [`compare_offsets`] is the explicit
//! comparator form of the same order, and deduplication must go through the
//! comparator rather than a separate equality check so the two can never
//! disagree.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// A `[start, end)` character range in the annotated text.
///
/// `start <= end` always holds for values built through [`Offsets::new`] or
/// [`Offsets::ordered`]. Serialized as a two-element array, matching how
/// annotation editors ship offsets over the wire.
///
/// The derived [`Ord`] is the canonical ordering: `start` first, then `end`.
/// Field order in this struct is load-bearing for the derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Offsets {
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
}

impl Offsets {
    /// Create an offsets pair, rejecting reversed input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReversedOffsets`] if `start > end`.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(Error::reversed_offsets(start, end));
        }
        Ok(Self { start, end })
    }

    /// Create an offsets pair, swapping a reversed input into order.
    #[must_use]
    pub fn ordered(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the range covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a character position falls inside the range.
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Check if two ranges overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Offsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<(usize, usize)> for Offsets {
    fn from((start, end): (usize, usize)) -> Self {
        Self::ordered(start, end)
    }
}

impl From<Offsets> for (usize, usize) {
    fn from(offsets: Offsets) -> Self {
        (offsets.start, offsets.end)
    }
}

/// Compare two offsets pairs: `start` ascending, then `end` ascending.
///
/// Identical to the derived `Ord` on [`Offsets`]; exposed as a function so
/// sorting and deduplication visibly share one source of truth.
#[must_use]
pub fn compare_offsets(a: &Offsets, b: &Offsets) -> Ordering {
    a.cmp(b)
}

/// Slice `text` by character offsets.
///
/// Returns `None` when the range does not lie fully inside the text; the
/// caller decides how to degrade (comparisons treat it as the empty string).
#[must_use]
pub fn char_slice<'a>(text: &'a str, offsets: &Offsets) -> Option<&'a str> {
    if offsets.is_empty() && offsets.start <= text.chars().count() {
        return Some("");
    }

    let mut byte_start = None;
    let mut byte_end = None;
    for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
        if char_idx == offsets.start {
            byte_start = Some(byte_idx);
        }
        if char_idx + 1 == offsets.end {
            byte_end = Some(byte_idx + ch.len_utf8());
            break;
        }
    }

    match (byte_start, byte_end) {
        (Some(s), Some(e)) => Some(&text[s..e]),
        _ => None,
    }
}
