//! Highlight marker class tokens.

use crate::document::{AnnotatedText, Vid};

/// Render the highlight class tokens for a visual element.
///
/// Each marker attached to `vid` yields a `marker-<kind>` token; tokens
/// join with single spaces in marker order. A vid with no markers, or an
/// absent snapshot, renders as the empty string.
///
/// # Example
///
/// ```rust
/// use anno_view::{highlight_classes, AnnotatedText, Marker, MarkerKind, Vid};
///
/// let mut doc = AnnotatedText::new("text");
/// doc.add_marker("s1", Marker::new(MarkerKind::Focus));
/// doc.add_marker("s1", Marker::new(MarkerKind::Error));
///
/// assert_eq!(highlight_classes(&Vid::new("s1"), Some(&doc)), "marker-focus marker-error");
/// assert_eq!(highlight_classes(&Vid::new("s2"), Some(&doc)), "");
/// ```
#[must_use]
pub fn highlight_classes(vid: &Vid, data: Option<&AnnotatedText>) -> String {
    let Some(data) = data else {
        return String::new();
    };

    let classes: Vec<String> = data
        .markers(vid)
        .iter()
        .map(|marker| format!("marker-{}", marker.kind.as_label()))
        .collect();
    classes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Marker, MarkerKind};

    #[test]
    fn tokens_preserve_marker_order() {
        let mut doc = AnnotatedText::new("x");
        doc.add_marker("v1", Marker::new(MarkerKind::Error));
        doc.add_marker("v1", Marker::new(MarkerKind::Focus));
        assert_eq!(
            highlight_classes(&Vid::new("v1"), Some(&doc)),
            "marker-error marker-focus"
        );
    }

    #[test]
    fn custom_kinds_render_their_tag() {
        let mut doc = AnnotatedText::new("x");
        doc.add_marker("v1", Marker::new(MarkerKind::Other("pending".to_string())));
        assert_eq!(
            highlight_classes(&Vid::new("v1"), Some(&doc)),
            "marker-pending"
        );
    }

    #[test]
    fn no_markers_renders_empty() {
        let doc = AnnotatedText::new("x");
        assert_eq!(highlight_classes(&Vid::new("v1"), Some(&doc)), "");
        assert_eq!(highlight_classes(&Vid::new("v1"), None), "");
    }
}
