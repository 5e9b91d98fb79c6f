//! Error types for anno-view.

use thiserror::Error;

use crate::document::Vid;

/// Result type for anno-view operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for anno-view operations.
///
/// The viewer derivations themselves never fail: absent input degrades to
/// an empty result. Errors only arise when constructing offsets or when
/// validating a snapshot against its own text.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Offsets pair with start after end.
    #[error("Reversed offsets: start {start} > end {end}")]
    ReversedOffsets {
        /// Start character offset
        start: usize,
        /// End character offset
        end: usize,
    },

    /// Span offsets reach past the end of the snapshot text.
    #[error("Span {vid} covers {start}..{end} but text has {text_len} characters")]
    SpanOutOfBounds {
        /// Identifier of the offending span
        vid: Vid,
        /// Start character offset
        start: usize,
        /// End character offset
        end: usize,
        /// Character length of the snapshot text
        text_len: usize,
    },

    /// Relation argument points at a vid with no span in the snapshot.
    #[error("Relation {vid} targets {target}, which is not a span in the snapshot")]
    DanglingTarget {
        /// Identifier of the offending relation
        vid: Vid,
        /// The unresolvable target vid
        target: Vid,
    },

    /// Relation carries no arguments at all.
    #[error("Relation {vid} has no arguments")]
    EmptyArguments {
        /// Identifier of the offending relation
        vid: Vid,
    },
}

impl Error {
    /// Create a reversed-offsets error.
    pub fn reversed_offsets(start: usize, end: usize) -> Self {
        Error::ReversedOffsets { start, end }
    }

    /// Create a span-out-of-bounds error.
    pub fn span_out_of_bounds(vid: Vid, start: usize, end: usize, text_len: usize) -> Self {
        Error::SpanOutOfBounds {
            vid,
            start,
            end,
            text_len,
        }
    }

    /// Create a dangling-target error.
    pub fn dangling_target(vid: Vid, target: Vid) -> Self {
        Error::DanglingTarget { vid, target }
    }

    /// Create an empty-arguments error.
    pub fn empty_arguments(vid: Vid) -> Self {
        Error::EmptyArguments { vid }
    }
}
