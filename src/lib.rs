//! # anno-view
//!
//! Presentation-data shaping for text annotation viewers.
//!
//! Given an immutable [`AnnotatedText`] snapshot (raw text, labeled spans
//! and relations, and highlight markers), this crate derives the secondary
//! structures a rendering layer needs:
//!
//! - **Labels**: [`render_label`] normalizes and truncates an annotation's
//!   display label.
//! - **Dedup**: [`unique_labels`] / [`unique_offsets`] produce sorted,
//!   duplicate-free sequences for legends and offset rulers.
//! - **Grouping**: [`group_by`] and its four specializations partition
//!   spans/relations by label or position with deterministic ordering.
//! - **Highlights**: [`highlight_classes`] renders a visual element's
//!   markers as `marker-<kind>` class tokens.
//!
//! Everything is a pure, synchronous function over the snapshot: nothing
//! is mutated and nothing blocks, so calling twice on an unmodified
//! snapshot yields identical output. How annotations are created, stored,
//! fetched, or painted is the surrounding system's business.
//!
//! ## Quick Start
//!
//! ```rust
//! use anno_view::prelude::*;
//!
//! let mut doc = AnnotatedText::new("The cat sat on the cat");
//! doc.add_span(Span::new("s1", Layer::new(1, "Named entity"), Offsets::ordered(4, 7))
//!     .with_label("ANIMAL"));
//! doc.add_span(Span::new("s2", Layer::new(1, "Named entity"), Offsets::ordered(19, 22))
//!     .with_label("ANIMAL"));
//!
//! let labels = unique_labels(Some(&doc));
//! assert_eq!(labels, ["ANIMAL"]);
//!
//! let groups = group_spans_by_label(Some(&doc));
//! assert_eq!(groups["ANIMAL"].len(), 2);
//! ```
//!
//! ## Collation
//!
//! Sorting labels and covered text is a locale concern. The default
//! [`CodePointCollator`] is deterministic scalar-value order; plug a real
//! locale collator through the `_with` variants ([`unique_labels_with`],
//! [`group_spans_by_label_with`]) when linguistic ordering matters. See
//! [`collate`] for the behavioral difference.
//!
//! ## Degraded Input
//!
//! Absence is not an error: a `None` snapshot, an unlabeled annotation, or
//! a vid without markers all degrade to empty results. A span range
//! outside the text compares as the empty string; a relation without a
//! resolvable first target sorts last in its label bucket and lands in the
//! sentinel position bucket. Nothing here panics on malformed input.

#![warn(missing_docs)]

pub mod collate;
pub mod dedup;
pub mod document;
mod error;
pub mod group;
pub mod highlight;
pub mod label;
pub mod offset;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use anno_view::prelude::*;
    //!
    //! let doc = AnnotatedText::new("some text");
    //! assert!(unique_labels(Some(&doc)).is_empty());
    //! ```
    pub use crate::collate::{CodePointCollator, Collator};
    pub use crate::dedup::{unique_labels, unique_labels_with, unique_offsets};
    pub use crate::document::{
        AnnotatedText, Annotation, Argument, Layer, Marker, MarkerKind, Relation, Span, Vid,
    };
    pub use crate::error::{Error, Result};
    pub use crate::group::{
        group_by, group_relations_by_label, group_relations_by_position, group_spans_by_label,
        group_spans_by_label_with, group_spans_by_position,
    };
    pub use crate::highlight::highlight_classes;
    pub use crate::label::render_label;
    pub use crate::offset::{compare_offsets, Offsets};
}

// Re-exports
pub use collate::{CodePointCollator, Collator};
pub use dedup::{unique_labels, unique_labels_with, unique_offsets};
pub use document::{
    AnnotatedText, Annotation, Argument, Layer, LayerId, Marker, MarkerKind, Relation, Span, Vid,
};
pub use error::{Error, Result};
pub use group::{
    compare_span_text, group_by, group_relations_by_label, group_relations_by_position,
    group_spans_by_label, group_spans_by_label_with, group_spans_by_position,
};
pub use highlight::highlight_classes;
pub use label::{render_label, MAX_LABEL_CHARS};
pub use offset::{char_slice, compare_offsets, Offsets};
