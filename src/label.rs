//! Display-label rendering.

use crate::document::Annotation;

/// Maximum rendered label length in characters, before the ellipsis.
pub const MAX_LABEL_CHARS: usize = 300;

const ELLIPSIS: char = '…';

/// Render an annotation's canonical display label.
///
/// An absent annotation renders as the empty string. A set, non-empty
/// label is used as-is; otherwise the fallback is `[<layer name>]`. The
/// result is whitespace-normalized (runs collapsed to a single space,
/// ends trimmed) and then truncated to [`MAX_LABEL_CHARS`] characters
/// plus a single ellipsis. Truncation happens after normalization, so the
/// cut point is measured on the collapsed string.
///
/// # Example
///
/// ```rust
/// use anno_view::{render_label, Layer, Offsets, Span};
///
/// let layer = Layer::new(1, "Named entity");
/// let span = Span::new("s1", layer.clone(), Offsets::ordered(0, 3)).with_label("  PER\tSON ");
/// assert_eq!(render_label(Some(&span)), "PER SON");
///
/// let unlabeled = Span::new("s2", layer, Offsets::ordered(4, 7));
/// assert_eq!(render_label(Some(&unlabeled)), "[Named entity]");
/// assert_eq!(render_label(None), "");
/// ```
#[must_use]
pub fn render_label(ann: Option<&dyn Annotation>) -> String {
    let Some(ann) = ann else {
        return String::new();
    };

    let raw = match ann.label() {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => format!("[{}]", ann.layer().name),
    };

    // split_whitespace collapses runs and drops leading/trailing in one pass
    let mut label = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if label.chars().count() > MAX_LABEL_CHARS {
        label = label
            .chars()
            .take(MAX_LABEL_CHARS)
            .collect::<String>()
            .trim_end()
            .to_string();
        label.push(ELLIPSIS);
    }

    label
}
