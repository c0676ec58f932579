//! Descriptor builders
//!
//! Pure constructors: each tags a kind and keeps the supplied attributes as
//! given. Nothing is validated here; missing or odd geometry flows through
//! to normalization unchanged.

use mandala_paint::{ring_points, Vec2};

use crate::shape::{Attributes, Shape, ShapeKind};
use crate::value::Value;

/// Build an [`Attributes`] map from `key: value` pairs.
///
/// Keys are identifiers or string literals; values are anything that
/// converts into a [`Value`].
///
/// ```
/// use mandala_core::{attrs, circle, rgba};
///
/// let dot = circle(attrs! { r: 10, fill: rgba(255.0, 0.0, 0.0, 1.0), "stroke-width": 2 });
/// assert_eq!(dot.number("r"), Some(10.0));
/// ```
#[macro_export]
macro_rules! attrs {
    ($($key:tt : $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut attrs = $crate::Attributes::new();
        $(
            attrs.insert(
                $crate::__attr_key!($key).to_string(),
                $crate::Value::from($value),
            );
        )*
        attrs
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __attr_key {
    ($key:ident) => {
        stringify!($key)
    };
    ($key:literal) => {
        $key
    };
}

/// One child or many; composites always store a list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contents(pub Vec<Shape>);

impl From<Shape> for Contents {
    fn from(shape: Shape) -> Self {
        Contents(vec![shape])
    }
}

impl From<Vec<Shape>> for Contents {
    fn from(shapes: Vec<Shape>) -> Self {
        Contents(shapes)
    }
}

impl<const N: usize> From<[Shape; N]> for Contents {
    fn from(shapes: [Shape; N]) -> Self {
        Contents(shapes.into())
    }
}

impl From<Option<Shape>> for Contents {
    fn from(shape: Option<Shape>) -> Self {
        Contents(shape.into_iter().collect())
    }
}

pub fn circle(attrs: Attributes) -> Shape {
    Shape::new(ShapeKind::Circle, attrs)
}

pub fn ellipse(attrs: Attributes) -> Shape {
    Shape::new(ShapeKind::Ellipse, attrs)
}

pub fn rect(attrs: Attributes) -> Shape {
    Shape::new(ShapeKind::Rect, attrs)
}

/// Rect with fully rounded ends: `rx` is half the shorter side
pub fn capsule(attrs: Attributes) -> Shape {
    let side = |key: &str| attrs.get(key).and_then(Value::as_number);
    let rx = match (side("width"), side("height")) {
        (Some(w), Some(h)) if !w.is_nan() && !h.is_nan() => w.min(h) / 2.0,
        _ => 0.0,
    };
    let mut attrs = attrs;
    attrs.insert("rx".to_string(), Value::Number(rx));
    rect(attrs)
}

pub fn line(attrs: Attributes) -> Shape {
    Shape::new(ShapeKind::Line, attrs)
}

pub fn polygon(attrs: Attributes) -> Shape {
    Shape::new(ShapeKind::Polygon, attrs)
}

pub fn polyline(attrs: Attributes) -> Shape {
    Shape::new(ShapeKind::Polyline, attrs)
}

pub fn path(attrs: Attributes) -> Shape {
    Shape::new(ShapeKind::Path, attrs)
}

/// Polygon with cut corners: `sides`, `width`, corner radius `r`, center `x`/`y`
pub fn rounded_polygon(attrs: Attributes) -> Shape {
    Shape::new(ShapeKind::RoundedPolygon, attrs)
}

/// Regular polygon.
///
/// Without a corner radius this is a plain `polygon` whose vertices sit on a
/// circle of radius `width` (default 10) around `x`/`y`, `sides` defaulting
/// to 3. A non-zero `r` produces a rounded polygon instead.
pub fn reg_poly(attrs: Attributes) -> Shape {
    let number = |key: &str, default: f64| {
        attrs.get(key).and_then(Value::as_number).unwrap_or(default)
    };

    if number("r", 0.0) != 0.0 {
        return rounded_polygon(attrs);
    }

    let center = Vec2::new(number("x", 0.0), number("y", 0.0));
    let sides = number("sides", 3.0);
    let sides = if sides.is_finite() && sides > 0.0 {
        sides as usize
    } else {
        0
    };
    let points = ring_points(number("width", 10.0), sides, center, 0.0);

    let mut rest: Attributes = attrs
        .into_iter()
        .filter(|(k, _)| !matches!(k.as_str(), "x" | "y" | "width" | "sides" | "r"))
        .collect();
    rest.insert("points".to_string(), Value::from(points));
    polygon(rest)
}

pub fn text(content: impl Into<String>, attrs: Attributes) -> Shape {
    Shape::text(content, attrs)
}

pub fn group(contents: impl Into<Contents>, attrs: Attributes) -> Shape {
    Shape::composite(ShapeKind::Group, contents.into().0, attrs)
}

pub fn clip_path(contents: impl Into<Contents>, attrs: Attributes) -> Shape {
    Shape::composite(ShapeKind::ClipPath, contents.into().0, attrs)
}

pub fn mask(contents: impl Into<Contents>, attrs: Attributes) -> Shape {
    Shape::composite(ShapeKind::Mask, contents.into().0, attrs)
}

pub fn translate(shape: &Shape, offset: impl Into<Value>) -> Shape {
    shape.with("translate", offset)
}

pub fn rotate(shape: &Shape, angle: impl Into<Value>) -> Shape {
    shape.with("rotate", angle)
}

pub fn scale(shape: &Shape, factor: impl Into<Value>) -> Shape {
    shape.with("scale", factor)
}

/// Reflection axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Flip across an axis by scaling it by -1
pub fn reflect(shape: &Shape, axis: Axis) -> Shape {
    let factors = match axis {
        Axis::X => [-1.0, 1.0],
        Axis::Y => [1.0, -1.0],
    };
    scale(shape, factors)
}

/// Group of the shape and its reflection
pub fn mirror(shape: &Shape, axis: Axis) -> Shape {
    group(vec![shape.clone(), reflect(shape, axis)], Attributes::new())
}
