//! Shape descriptors
//!
//! A [`Shape`] is an immutable record of a kind, an ordered attribute map and
//! a body: children for composites, a text payload for `text`, nothing for
//! other leaves. Every modifier returns a new descriptor; attribute maps and
//! child lists are reference counted so untouched parts are shared between
//! the old and the new tree.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::MandalaError;
use crate::value::Value;

/// Ordered attribute map; iteration order is insertion order
pub type Attributes = IndexMap<String, Value>;

/// The closed set of shape kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Ellipse,
    Rect,
    Line,
    Polygon,
    RoundedPolygon,
    Polyline,
    Path,
    Group,
    ClipPath,
    Mask,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 12] = [
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Rect,
        ShapeKind::Line,
        ShapeKind::Polygon,
        ShapeKind::RoundedPolygon,
        ShapeKind::Polyline,
        ShapeKind::Path,
        ShapeKind::Group,
        ShapeKind::ClipPath,
        ShapeKind::Mask,
        ShapeKind::Text,
    ];

    /// Descriptor-level name
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Rect => "rect",
            ShapeKind::Line => "line",
            ShapeKind::Polygon => "polygon",
            ShapeKind::RoundedPolygon => "roundedPolygon",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Path => "path",
            ShapeKind::Group => "group",
            ShapeKind::ClipPath => "clipPath",
            ShapeKind::Mask => "mask",
            ShapeKind::Text => "text",
        }
    }

    /// Element tag the backend creates for this kind
    pub fn tag(self) -> &'static str {
        match self {
            ShapeKind::Group => "g",
            // Synthesized into a path before it reaches a backend.
            ShapeKind::RoundedPolygon => "path",
            other => other.name(),
        }
    }

    /// Kinds that carry an ordered child list
    pub fn is_composite(self) -> bool {
        matches!(self, ShapeKind::Group | ShapeKind::ClipPath | ShapeKind::Mask)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = MandalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "g" {
            return Ok(ShapeKind::Group);
        }
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| MandalaError::UnknownShape(s.to_string()))
    }
}

/// What a shape holds besides its attributes
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Children(Arc<[Shape]>),
    Text(Arc<str>),
}

/// An immutable shape descriptor
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    attrs: Arc<Attributes>,
    body: Body,
}

impl Shape {
    /// Leaf descriptor
    pub fn new(kind: ShapeKind, attrs: Attributes) -> Self {
        let body = if kind.is_composite() {
            Body::Children(Arc::from(Vec::new()))
        } else {
            Body::Empty
        };
        Self {
            kind,
            attrs: Arc::new(attrs),
            body,
        }
    }

    /// Composite descriptor; `kind` should be a composite kind
    pub fn composite(kind: ShapeKind, children: Vec<Shape>, attrs: Attributes) -> Self {
        Self {
            kind,
            attrs: Arc::new(attrs),
            body: Body::Children(children.into()),
        }
    }

    /// Text descriptor
    pub fn text(content: impl Into<String>, attrs: Attributes) -> Self {
        let content: String = content.into();
        Self {
            kind: ShapeKind::Text,
            attrs: Arc::new(attrs),
            body: Body::Text(Arc::from(content)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Numeric attribute, `None` when absent or non-numeric
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(Value::as_number)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Children in render order; empty for leaves
    pub fn children(&self) -> &[Shape] {
        match &self.body {
            Body::Children(children) => &children[..],
            _ => &[],
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.body, Body::Children(_))
    }

    /// Copy with `key` set to `value`
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut attrs = (*self.attrs).clone();
        attrs.insert(key.into(), value.into());
        self.with_attrs(attrs)
    }

    /// Copy with `extra` merged over the existing attributes
    pub fn merge(&self, extra: &Attributes) -> Self {
        if extra.is_empty() {
            return self.clone();
        }
        let mut attrs = (*self.attrs).clone();
        attrs.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.with_attrs(attrs)
    }

    /// Copy without the listed keys
    pub fn without(&self, keys: &[&str]) -> Self {
        let attrs = self
            .attrs
            .iter()
            .filter(|(k, _)| !keys.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.with_attrs(attrs)
    }

    /// Copy with a replaced attribute map, sharing the body
    pub fn with_attrs(&self, attrs: Attributes) -> Self {
        Self {
            kind: self.kind,
            attrs: Arc::new(attrs),
            body: self.body.clone(),
        }
    }

    /// Copy with a replaced child list, sharing the attributes
    pub fn with_children(&self, children: Vec<Shape>) -> Self {
        Self {
            kind: self.kind,
            attrs: Arc::clone(&self.attrs),
            body: Body::Children(children.into()),
        }
    }

    /// Copy re-tagged as another kind, sharing attributes and body
    pub fn with_kind(&self, kind: ShapeKind) -> Self {
        Self {
            kind,
            attrs: Arc::clone(&self.attrs),
            body: self.body.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn shares_attrs_with(&self, other: &Shape) -> bool {
        Arc::ptr_eq(&self.attrs, &other.attrs)
    }
}
