//! Sorted, duplicate-free label and offset sequences.
//!
//! Both derivations share one pattern: stable-sort the derived keys, then
//! collapse adjacent equals in a single forward pass. A set would lose the
//! sorted order downstream callers need, and for offsets the collapse must
//! ask the *comparator* (the same one used for sorting) so that sorting
//! and deduplication can never disagree about what counts as equal.

use crate::collate::{CodePointCollator, Collator};
use crate::document::AnnotatedText;
use crate::label::render_label;
use crate::offset::{compare_offsets, Offsets};

/// Sorted unique display labels of every annotation in the snapshot.
///
/// Uses the default [`CodePointCollator`]; see [`unique_labels_with`] for
/// caller-supplied collation. Absent data yields an empty vec.
#[must_use]
pub fn unique_labels(data: Option<&AnnotatedText>) -> Vec<String> {
    unique_labels_with(data, &CodePointCollator)
}

/// Sorted unique display labels under a caller-supplied collation.
///
/// Every annotation's label is rendered via [`render_label`], the multiset
/// is stable-sorted with `collator`, and consecutive exact-equal strings
/// collapse to the first occurrence. O(n log n).
#[must_use]
pub fn unique_labels_with(data: Option<&AnnotatedText>, collator: &dyn Collator) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };

    let mut labels: Vec<String> = data
        .annotations()
        .map(|ann| render_label(Some(ann)))
        .collect();
    labels.sort_by(|a, b| collator.compare(a, b));
    labels.dedup();
    labels
}

/// Sorted unique primary offsets of every span in the snapshot.
///
/// Sorted by [`compare_offsets`]; adjacent pairs the comparator calls
/// equal collapse to the first occurrence. Absent data yields an empty
/// vec. O(n log n).
#[must_use]
pub fn unique_offsets(data: Option<&AnnotatedText>) -> Vec<Offsets> {
    let Some(data) = data else {
        return Vec::new();
    };

    let mut offsets: Vec<Offsets> = data.spans().map(|span| *span.primary_offsets()).collect();
    offsets.sort_by(compare_offsets);
    offsets.dedup_by(|later, earlier| compare_offsets(earlier, later).is_eq());
    offsets
}
