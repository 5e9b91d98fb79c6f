//! Grouping spans and relations into named buckets.
//!
//! [`group_by`] is the generic partition engine: string-keyed buckets in
//! first-seen order, elements in input order. The four specializations
//! answer the two questions a viewer asks:
//!
//! - **by label**: "which annotations share this display text" (legends,
//!   filters), with buckets re-sorted by underlying text and then by
//!   position so the display reads stably;
//! - **by position**: "which annotations occupy the same span" (stacked
//!   rendering of overlapping annotations), where the full offsets list is
//!   the natural key and the input order already is the display order.

use indexmap::IndexMap;
use std::cmp::Ordering;

use crate::collate::{CodePointCollator, Collator};
use crate::document::{AnnotatedText, Annotation, Relation, Span};
use crate::label::render_label;
use crate::offset::{compare_offsets, Offsets};

/// Partition an iterable into string-keyed buckets.
///
/// Each element's key is computed by `key` and converted to its string
/// form; the element lands in the bucket for that exact string, created on
/// first use. Bucket order is first-seen key order, intra-bucket order is
/// input order, and no element is dropped or duplicated. Absent data
/// yields an empty map. `group_by` itself never sorts; ordering within a
/// bucket is the caller's job when one is required.
#[must_use]
pub fn group_by<T, I, K, F>(data: Option<I>, mut key: F) -> IndexMap<String, Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> K,
    K: ToString,
{
    let mut groups: IndexMap<String, Vec<T>> = IndexMap::new();
    let Some(data) = data else {
        return groups;
    };

    for item in data {
        let key = key(&item).to_string();
        groups.entry(key).or_default().push(item);
    }

    groups
}

/// Compare two spans by the literal text their primary offsets denote.
///
/// A span whose range falls outside the text compares as the empty
/// string.
#[must_use]
pub fn compare_span_text(
    data: &AnnotatedText,
    a: &Span,
    b: &Span,
    collator: &dyn Collator,
) -> Ordering {
    let text_a = data.covered_text(a.primary_offsets()).unwrap_or("");
    let text_b = data.covered_text(b.primary_offsets()).unwrap_or("");
    collator.compare(text_a, text_b)
}

/// Group spans by rendered label, buckets sorted for display.
///
/// Primary sort key is the covered text under the default collation,
/// tie-break is the primary offsets order. See
/// [`group_spans_by_label_with`] for caller-supplied collation.
#[must_use]
pub fn group_spans_by_label(data: Option<&AnnotatedText>) -> IndexMap<String, Vec<&Span>> {
    group_spans_by_label_with(data, &CodePointCollator)
}

/// Group spans by rendered label under a caller-supplied collation.
#[must_use]
pub fn group_spans_by_label_with<'a>(
    data: Option<&'a AnnotatedText>,
    collator: &dyn Collator,
) -> IndexMap<String, Vec<&'a Span>> {
    let mut groups = group_by(data.map(AnnotatedText::spans), |span| {
        render_label(Some(*span))
    });
    if let Some(data) = data {
        for bucket in groups.values_mut() {
            bucket.sort_by(|a, b| {
                compare_span_text(data, a, b, collator)
                    .then_with(|| compare_offsets(a.primary_offsets(), b.primary_offsets()))
            });
        }
    }
    groups
}

/// Group relations by rendered label, buckets sorted by the position of
/// each relation's first argument's target span.
///
/// Relations whose first argument is absent or does not resolve to a span
/// sort after all resolvable ones, keeping their relative input order.
#[must_use]
pub fn group_relations_by_label(data: Option<&AnnotatedText>) -> IndexMap<String, Vec<&Relation>> {
    let mut groups = group_by(data.map(AnnotatedText::relations), |relation| {
        render_label(Some(*relation))
    });
    if let Some(data) = data {
        for bucket in groups.values_mut() {
            bucket.sort_by(|a, b| {
                match (data.first_target_span(a), data.first_target_span(b)) {
                    (Some(a), Some(b)) => {
                        compare_offsets(a.primary_offsets(), b.primary_offsets())
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }
    }
    groups
}

/// Group spans by their full offsets list.
///
/// Two spans share a bucket only when their complete, possibly
/// multi-segment offset sets are identical. No secondary sort; input
/// order is the display order.
#[must_use]
pub fn group_spans_by_position(data: Option<&AnnotatedText>) -> IndexMap<String, Vec<&Span>> {
    group_by(data.map(AnnotatedText::spans), |span| {
        position_key(span.offsets())
    })
}

/// Group relations by the full offsets list of the first argument's
/// target span.
///
/// Relations with an absent or unresolvable first target land in a
/// sentinel bucket under the empty key. No secondary sort.
#[must_use]
pub fn group_relations_by_position(
    data: Option<&AnnotatedText>,
) -> IndexMap<String, Vec<&Relation>> {
    let Some(data) = data else {
        return IndexMap::new();
    };
    group_by(Some(data.relations()), |relation| {
        match data.first_target_span(relation) {
            Some(span) => position_key(span.offsets()),
            None => {
                log::debug!(
                    "relation {} has no resolvable span target, using sentinel position key",
                    relation.vid()
                );
                String::new()
            }
        }
    })
}

/// Canonical string form of an offsets list: `start-end` pairs joined by
/// commas, e.g. `0-3,5-8`.
fn position_key(offsets: &[Offsets]) -> String {
    let mut key = String::new();
    for (i, pair) in offsets.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        key.push_str(&pair.to_string());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Argument, Layer, Marker, MarkerKind, Vid};

    fn layer() -> Layer {
        Layer::new(1, "Named entity")
    }

    fn rel_layer() -> Layer {
        Layer::new(2, "Dependency")
    }

    #[test]
    fn group_by_partitions_without_loss() {
        let groups = group_by(Some(vec![1, 2, 3, 4, 5, 6]), |n| n % 3);
        assert_eq!(groups.len(), 3);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, 6);
        assert_eq!(groups["1"], [1, 4]);
        assert_eq!(groups["2"], [2, 5]);
        assert_eq!(groups["0"], [3, 6]);
    }

    #[test]
    fn group_by_bucket_order_is_first_seen() {
        let groups = group_by(Some(vec!["b", "a", "b", "c"]), |s| s.to_string());
        let keys: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn group_by_absent_data_is_empty() {
        let groups = group_by(None::<Vec<i32>>, |n| *n);
        assert!(groups.is_empty());
    }

    #[test]
    fn spans_by_label_sorted_by_text_then_offsets() {
        // "cat" appears at 0-3 and 11-14; "ant" at 4-7
        let mut doc = AnnotatedText::new("cat ant is cat");
        doc.add_span(Span::new("s1", layer(), Offsets::ordered(11, 14)).with_label("ANIMAL"));
        doc.add_span(Span::new("s2", layer(), Offsets::ordered(0, 3)).with_label("ANIMAL"));
        doc.add_span(Span::new("s3", layer(), Offsets::ordered(4, 7)).with_label("ANIMAL"));

        let groups = group_spans_by_label(Some(&doc));
        let bucket = &groups["ANIMAL"];
        let order: Vec<_> = bucket.iter().map(|s| s.vid().as_str()).collect();
        // "ant" sorts before "cat"; the two "cat"s tie on text and fall
        // back to offsets order
        assert_eq!(order, ["s3", "s2", "s1"]);
    }

    #[test]
    fn spans_by_label_out_of_range_text_compares_empty() {
        let mut doc = AnnotatedText::new("tiny");
        doc.add_span(Span::new("s1", layer(), Offsets::ordered(0, 4)).with_label("X"));
        doc.add_span(Span::new("s2", layer(), Offsets::ordered(50, 60)).with_label("X"));
        let groups = group_spans_by_label(Some(&doc));
        let order: Vec<_> = groups["X"].iter().map(|s| s.vid().as_str()).collect();
        // Empty text sorts before "tiny"
        assert_eq!(order, ["s2", "s1"]);
    }

    #[test]
    fn spans_by_label_separates_distinct_labels() {
        let mut doc = AnnotatedText::new("a b c");
        doc.add_span(Span::new("s1", layer(), Offsets::ordered(0, 1)).with_label("PER"));
        doc.add_span(Span::new("s2", layer(), Offsets::ordered(2, 3)).with_label("ORG"));
        doc.add_span(Span::new("s3", layer(), Offsets::ordered(4, 5)));
        let groups = group_spans_by_label(Some(&doc));
        assert_eq!(groups.len(), 3);
        assert!(groups.contains_key("PER"));
        assert!(groups.contains_key("ORG"));
        assert!(groups.contains_key("[Named entity]"));
    }

    #[test]
    fn relations_by_label_sorted_by_first_target_position() {
        let mut doc = AnnotatedText::new("one two three four");
        doc.add_span(Span::new("s1", layer(), Offsets::ordered(8, 13)));
        doc.add_span(Span::new("s2", layer(), Offsets::ordered(0, 3)));
        doc.add_relation(
            Relation::new("r1", rel_layer(), vec![Argument::new("s1")]).with_label("dep"),
        );
        doc.add_relation(
            Relation::new("r2", rel_layer(), vec![Argument::new("s2")]).with_label("dep"),
        );

        let groups = group_relations_by_label(Some(&doc));
        let order: Vec<_> = groups["dep"].iter().map(|r| r.vid().as_str()).collect();
        assert_eq!(order, ["r2", "r1"]);
    }

    #[test]
    fn relations_by_label_tolerates_unresolvable_targets() {
        let mut doc = AnnotatedText::new("one two");
        doc.add_span(Span::new("s1", layer(), Offsets::ordered(4, 7)));
        doc.add_relation(
            Relation::new("r1", rel_layer(), vec![]).with_label("dep"),
        );
        doc.add_relation(
            Relation::new("r2", rel_layer(), vec![Argument::new("ghost")]).with_label("dep"),
        );
        doc.add_relation(
            Relation::new("r3", rel_layer(), vec![Argument::new("s1")]).with_label("dep"),
        );

        let groups = group_relations_by_label(Some(&doc));
        let order: Vec<_> = groups["dep"].iter().map(|r| r.vid().as_str()).collect();
        // Resolvable first, unresolvable keep their relative input order
        assert_eq!(order, ["r3", "r1", "r2"]);
    }

    #[test]
    fn spans_by_position_keys_on_full_offset_list() {
        let mut doc = AnnotatedText::new("abcdefghij");
        doc.add_span(Span::new("s1", layer(), Offsets::ordered(0, 3)).with_label("A"));
        doc.add_span(Span::new("s2", layer(), Offsets::ordered(0, 3)).with_label("B"));
        doc.add_span(
            Span::new("s3", layer(), Offsets::ordered(0, 3)).with_segment(Offsets::ordered(5, 8)),
        );

        let groups = group_spans_by_position(Some(&doc));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["0-3"].len(), 2);
        assert_eq!(groups["0-3,5-8"].len(), 1);
    }

    #[test]
    fn spans_by_position_preserves_input_order() {
        let mut doc = AnnotatedText::new("abcdefghij");
        doc.add_span(Span::new("z", layer(), Offsets::ordered(2, 4)));
        doc.add_span(Span::new("a", layer(), Offsets::ordered(2, 4)));
        let groups = group_spans_by_position(Some(&doc));
        let order: Vec<_> = groups["2-4"].iter().map(|s| s.vid().as_str()).collect();
        assert_eq!(order, ["z", "a"]);
    }

    #[test]
    fn relations_by_position_keys_on_target_offsets() {
        let mut doc = AnnotatedText::new("one two three");
        doc.add_span(Span::new("s1", layer(), Offsets::ordered(0, 3)));
        doc.add_span(Span::new("s2", layer(), Offsets::ordered(4, 7)));
        doc.add_relation(Relation::new("r1", rel_layer(), vec![Argument::new("s1")]));
        doc.add_relation(Relation::new("r2", rel_layer(), vec![Argument::new("s2")]));
        doc.add_relation(Relation::new("r3", rel_layer(), vec![Argument::new("s1")]));

        let groups = group_relations_by_position(Some(&doc));
        assert_eq!(groups["0-3"].len(), 2);
        assert_eq!(groups["4-7"].len(), 1);
    }

    #[test]
    fn relations_by_position_sentinel_bucket() {
        let mut doc = AnnotatedText::new("one");
        doc.add_relation(Relation::new("r1", rel_layer(), vec![Argument::new("ghost")]));
        let groups = group_relations_by_position(Some(&doc));
        assert_eq!(groups[""].len(), 1);
    }

    #[test]
    fn absent_data_yields_empty_groups() {
        assert!(group_spans_by_label(None).is_empty());
        assert!(group_relations_by_label(None).is_empty());
        assert!(group_spans_by_position(None).is_empty());
        assert!(group_relations_by_position(None).is_empty());
    }

    #[test]
    fn grouping_ignores_markers() {
        let mut doc = AnnotatedText::new("one");
        doc.add_span(Span::new("s1", layer(), Offsets::ordered(0, 3)));
        doc.add_marker("s1", Marker::new(MarkerKind::Focus));
        let groups = group_spans_by_position(Some(&doc));
        assert_eq!(groups.len(), 1);
        assert_eq!(doc.markers(&Vid::new("s1")).len(), 1);
    }
}
