//! The annotated-text snapshot and its entities.
//!
//! # Data Model
//!
//! ```text
//! AnnotatedText
//! ├── text: raw characters with stable integer offsets
//! ├── spans: Vid → Span          (one or more character ranges + label)
//! ├── relations: Vid → Relation  (ordered arguments targeting spans)
//! └── markers: Vid → [Marker]    (typed highlights on visual elements)
//! ```
//!
//! The snapshot is owned and populated by the external annotation data
//! layer. The derivations in this crate only read it: every function over
//! an [`AnnotatedText`] is a pure function of its current contents, and a
//! second call on an unmodified snapshot returns an identical result.
//!
//! # Design Philosophy
//!
//! Entities are intentionally minimal. A [`Span`] captures *where* (its
//! offsets) and *what to show* (label or layer fallback); a [`Relation`]
//! captures *which spans link together*. What they explicitly do NOT
//! capture: rendering state, colors, selection. Those belong to the
//! rendering layer that consumes the derived structures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::offset::{char_slice, Offsets};

/// Unique identifier for an annotation layer.
pub type LayerId = u64;

/// An annotation layer: the schema-level family a span or relation
/// belongs to. The layer name doubles as the display-label fallback for
/// annotations without a label of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique identifier within the annotation schema
    pub id: LayerId,
    /// Human-readable layer name (e.g. "Named entity")
    pub name: String,
}

impl Layer {
    /// Create a layer.
    #[must_use]
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Opaque identifier of a rendered visual element.
///
/// Correlates a visual element back to an annotation or sub-element.
/// Editors routinely use synthetic compound ids ("42", "42.1", "rel:7"),
/// so this is a string newtype rather than a numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vid(String);

impl Vid {
    /// Create a vid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Vid {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Vid {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Common surface of spans and relations: the bits label rendering needs.
pub trait Annotation {
    /// The visual element identifier.
    fn vid(&self) -> &Vid;

    /// The raw label, if one was set. Empty labels count as unset for
    /// display purposes; [`crate::label::render_label`] handles that.
    fn label(&self) -> Option<&str>;

    /// The layer this annotation belongs to.
    fn layer(&self) -> &Layer;
}

/// An annotation over one or more disjoint character ranges.
///
/// Spans always own at least one [`Offsets`] pair; the first is the
/// *primary* pair, used as the default position key by deduplication and
/// grouping. Additional segments make the span discontinuous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    vid: Vid,
    label: Option<String>,
    layer: Layer,
    offsets: Vec<Offsets>,
}

impl Span {
    /// Create a span over a single character range.
    #[must_use]
    pub fn new(vid: impl Into<Vid>, layer: Layer, offsets: Offsets) -> Self {
        Self {
            vid: vid.into(),
            label: None,
            layer,
            offsets: vec![offsets],
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a further disjoint segment, making the span discontinuous.
    #[must_use]
    pub fn with_segment(mut self, offsets: Offsets) -> Self {
        self.offsets.push(offsets);
        self
    }

    /// All segments of this span, primary first.
    #[must_use]
    pub fn offsets(&self) -> &[Offsets] {
        &self.offsets
    }

    /// The primary (first) offsets pair.
    #[must_use]
    pub fn primary_offsets(&self) -> &Offsets {
        &self.offsets[0]
    }

    /// Check that every segment lies inside a text of `text_len` characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpanOutOfBounds`] naming the first offending
    /// segment.
    pub fn validate_against(&self, text_len: usize) -> Result<()> {
        for segment in &self.offsets {
            if segment.end > text_len {
                return Err(Error::span_out_of_bounds(
                    self.vid.clone(),
                    segment.start,
                    segment.end,
                    text_len,
                ));
            }
        }
        Ok(())
    }
}

impl Annotation for Span {
    fn vid(&self) -> &Vid {
        &self.vid
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }
}

/// One argument of a relation: a role name and the vid of the span it
/// targets. Targets are stored as vids and resolved against the snapshot,
/// never as owned copies of the span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Role of this argument within the relation (e.g. "Governor")
    pub role: Option<String>,
    /// Vid of the targeted span
    pub target: Vid,
}

impl Argument {
    /// Create an argument targeting a span.
    #[must_use]
    pub fn new(target: impl Into<Vid>) -> Self {
        Self {
            role: None,
            target: target.into(),
        }
    }

    /// Set the argument role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// An annotation linking spans via an ordered argument list.
///
/// The subset of relations handled by the viewer always carries at least
/// one argument whose target resolves to a span; inputs violating that are
/// tolerated (degraded ordering, sentinel grouping key), never a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    vid: Vid,
    label: Option<String>,
    layer: Layer,
    arguments: Vec<Argument>,
}

impl Relation {
    /// Create a relation with its arguments in order.
    #[must_use]
    pub fn new(vid: impl Into<Vid>, layer: Layer, arguments: Vec<Argument>) -> Self {
        Self {
            vid: vid.into(),
            label: None,
            layer,
            arguments,
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The ordered argument list.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }
}

impl Annotation for Relation {
    fn vid(&self) -> &Vid {
        &self.vid
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }
}

/// Kind of a highlight marker, rendered as a `marker-<kind>` class token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Element currently in focus
    Focus,
    /// Element carrying an error
    Error,
    /// Element carrying a warning
    Warning,
    /// Informational highlight
    Info,
    /// Element matched by a search/filter
    Match,
    /// Any other marker kind
    Other(String),
}

impl MarkerKind {
    /// The class-token suffix for this kind.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            MarkerKind::Focus => "focus",
            MarkerKind::Error => "error",
            MarkerKind::Warning => "warning",
            MarkerKind::Info => "info",
            MarkerKind::Match => "match",
            MarkerKind::Other(s) => s.as_str(),
        }
    }

    /// Parse from a class-token suffix.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "focus" => MarkerKind::Focus,
            "error" => MarkerKind::Error,
            "warning" => MarkerKind::Warning,
            "info" => MarkerKind::Info,
            "match" => MarkerKind::Match,
            other => MarkerKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A typed highlight attached to a visual element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// The marker kind, driving the derived class token
    pub kind: MarkerKind,
}

impl Marker {
    /// Create a marker.
    #[must_use]
    pub fn new(kind: MarkerKind) -> Self {
        Self { kind }
    }
}

/// Immutable annotated-text snapshot: raw text plus the annotations and
/// markers attached to it.
///
/// Span and relation maps are insertion-ordered, so iteration order is
/// stable across calls; grouping output depends on it. The data layer
/// populates a snapshot once per render cycle; the derivations never
/// mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotatedText {
    text: String,
    spans: IndexMap<Vid, Span>,
    relations: IndexMap<Vid, Relation>,
    markers: HashMap<Vid, Vec<Marker>>,
}

impl AnnotatedText {
    /// Create an empty snapshot over the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: IndexMap::new(),
            relations: IndexMap::new(),
            markers: HashMap::new(),
        }
    }

    /// The raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Insert a span, keyed by its vid. A span with the same vid is
    /// replaced in place, keeping its original position in the order.
    pub fn add_span(&mut self, span: Span) {
        self.spans.insert(span.vid().clone(), span);
    }

    /// Insert a relation, keyed by its vid.
    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.insert(relation.vid().clone(), relation);
    }

    /// Attach a marker to a visual element.
    pub fn add_marker(&mut self, vid: impl Into<Vid>, marker: Marker) {
        self.markers.entry(vid.into()).or_default().push(marker);
    }

    /// Look up a span by vid.
    #[must_use]
    pub fn span(&self, vid: &Vid) -> Option<&Span> {
        self.spans.get(vid)
    }

    /// Look up a relation by vid.
    #[must_use]
    pub fn relation(&self, vid: &Vid) -> Option<&Relation> {
        self.relations.get(vid)
    }

    /// All spans in insertion order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.values()
    }

    /// All relations in insertion order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    /// All annotations: spans first, then relations, each in insertion
    /// order.
    pub fn annotations(&self) -> impl Iterator<Item = &dyn Annotation> {
        self.spans
            .values()
            .map(|s| s as &dyn Annotation)
            .chain(self.relations.values().map(|r| r as &dyn Annotation))
    }

    /// Markers attached to a visual element; absent entries are an empty
    /// slice, not an error.
    #[must_use]
    pub fn markers(&self, vid: &Vid) -> &[Marker] {
        self.markers.get(vid).map_or(&[], Vec::as_slice)
    }

    /// The literal substring a character range denotes, or `None` when the
    /// range falls outside the text.
    #[must_use]
    pub fn covered_text(&self, offsets: &Offsets) -> Option<&str> {
        char_slice(&self.text, offsets)
    }

    /// The span targeted by a relation's first argument, if it resolves.
    ///
    /// Relations without arguments or with a dangling first target yield
    /// `None`; callers degrade per their own contract.
    #[must_use]
    pub fn first_target_span(&self, relation: &Relation) -> Option<&Span> {
        self.spans.get(&relation.arguments().first()?.target)
    }

    /// Check every span against the text and every relation argument
    /// against the span map.
    ///
    /// The derivations tolerate violations at each use site; this is for
    /// data layers that prefer to fail fast on a malformed snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::SpanOutOfBounds`], [`Error::EmptyArguments`]
    /// or [`Error::DanglingTarget`] found.
    pub fn validate(&self) -> Result<()> {
        let text_len = self.text.chars().count();
        for span in self.spans.values() {
            span.validate_against(text_len)?;
        }
        for relation in self.relations.values() {
            if relation.arguments().is_empty() {
                return Err(Error::empty_arguments(relation.vid().clone()));
            }
            for argument in relation.arguments() {
                if !self.spans.contains_key(&argument.target) {
                    return Err(Error::dangling_target(
                        relation.vid().clone(),
                        argument.target.clone(),
                    ));
                }
            }
        }
        Ok(())
    }
}
