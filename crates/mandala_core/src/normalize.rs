//! Descriptor normalization
//!
//! Turns a descriptor into its canonical, backend-ready form in three
//! passes: a kind-specific step, transform canonicalization and color
//! canonicalization. Only the node itself is normalized; children are
//! normalized when the compiler reaches them.

use mandala_paint::{rounded_polygon, Vec2};
use tracing::warn;

use crate::config::CompileOptions;
use crate::error::{MandalaError, Result};
use crate::shape::{Attributes, Shape, ShapeKind};
use crate::value::Value;

/// Keys folded into the `transform` attribute
const TRANSFORM_KEYS: [&str; 5] = ["translate", "rotate", "scale", "translateX", "translateY"];

/// Normalize a single descriptor node
pub fn normalize(shape: &Shape, options: &CompileOptions) -> Result<Shape> {
    if options.strict {
        validate(shape)?;
    }

    let shaped = match shape.kind() {
        ShapeKind::Rect => normalize_rect(shape),
        ShapeKind::Line => normalize_line(shape),
        ShapeKind::Polygon | ShapeKind::Polyline => normalize_points(shape),
        ShapeKind::RoundedPolygon => build_rounded_polygon(shape),
        ShapeKind::Circle
        | ShapeKind::Ellipse
        | ShapeKind::Path
        | ShapeKind::Group
        | ShapeKind::ClipPath
        | ShapeKind::Mask
        | ShapeKind::Text => shape.clone(),
    };

    let transformed = canonicalize_transform(&shaped);
    Ok(canonicalize_colors(&transformed, options.round_alpha))
}

fn number_or(attrs: &Attributes, key: &str, default: f64) -> f64 {
    attrs.get(key).and_then(Value::as_number).unwrap_or(default)
}

fn is_present(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

/// `w`/`h` become `width`/`height`; a center point becomes a top-left corner
fn normalize_rect(shape: &Shape) -> Shape {
    let mut attrs = shape.attrs().clone();
    for (from, to) in [("w", "width"), ("h", "height")] {
        if let Some(value) = attrs.shift_remove(from) {
            attrs.insert(to.to_string(), value);
        }
    }

    let cx = attrs.shift_remove("cx");
    let cy = attrs.shift_remove("cy");

    if let Some(cx) = cx {
        if !is_present(attrs.get("x")) {
            let width = number_or(&attrs, "width", f64::NAN);
            let cx = cx.as_number().unwrap_or(f64::NAN);
            attrs.insert("x".to_string(), Value::Number(cx - width / 2.0));
        }
    }
    if let Some(cy) = cy {
        if !is_present(attrs.get("y")) {
            let height = number_or(&attrs, "height", f64::NAN);
            let cy = cy.as_number().unwrap_or(f64::NAN);
            attrs.insert("y".to_string(), Value::Number(cy - height / 2.0));
        }
    }

    shape.with_attrs(attrs)
}

/// `start`/`end` points become `x1,y1,x2,y2`
fn normalize_line(shape: &Shape) -> Shape {
    let endpoints = shape
        .attr("start")
        .and_then(Value::as_vec2)
        .zip(shape.attr("end").and_then(Value::as_vec2));

    let stripped = shape.without(&["start", "end"]);
    let Some((start, end)) = endpoints else {
        return stripped;
    };

    let mut attrs = stripped.attrs().clone();
    for (key, value) in [("x1", start.x), ("y1", start.y), ("x2", end.x), ("y2", end.y)] {
        attrs.insert(key.to_string(), Value::Number(value));
    }
    shape.with_attrs(attrs)
}

/// A point list becomes `"x1,y1 x2,y2 ..."`
fn normalize_points(shape: &Shape) -> Shape {
    match shape.attr("points") {
        Some(Value::List(points)) => {
            let joined = points
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            shape.with("points", joined)
        }
        _ => shape.clone(),
    }
}

/// Rounded polygons become paths carrying the synthesized `d`
fn build_rounded_polygon(shape: &Shape) -> Shape {
    let attrs = shape.attrs();
    let center = Vec2::new(number_or(attrs, "x", 0.0), number_or(attrs, "y", 0.0));
    let width = number_or(attrs, "width", f64::NAN);
    let corner = number_or(attrs, "r", f64::NAN);
    let sides = number_or(attrs, "sides", 3.0);
    let sides = if sides.is_finite() && sides > 0.0 {
        sides as usize
    } else {
        0
    };

    let d = rounded_polygon(center, width, sides, corner).to_path_data();

    let mut path_attrs = Attributes::with_capacity(attrs.len() + 1);
    path_attrs.insert("d".to_string(), Value::Text(d));
    path_attrs.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));

    shape.with_kind(ShapeKind::Path).with_attrs(path_attrs)
}

/// Serialize one transform component, or `None` when any value is missing
fn transform_component(name: &str, value: &Value) -> Option<String> {
    let components = value.components();
    if components.is_empty() || components.iter().any(Value::is_null) {
        return None;
    }
    let args = components
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("{name}({args})"))
}

/// Fold translate/rotate/scale (and the per-axis translate shorthands) into
/// one `transform` string, always in translate, rotate, scale order
fn canonicalize_transform(shape: &Shape) -> Shape {
    let attrs = shape.attrs();
    if !TRANSFORM_KEYS.iter().any(|key| attrs.contains_key(*key)) {
        return shape.clone();
    }

    let axis_x = attrs.get("translateX").filter(|v| !v.is_null());
    let axis_y = attrs.get("translateY").filter(|v| !v.is_null());
    let translate = match (axis_x, axis_y) {
        (None, None) => attrs.get("translate").cloned(),
        (x, y) => Some(Value::List(vec![
            x.cloned().unwrap_or(Value::Number(0.0)),
            y.cloned().unwrap_or(Value::Number(0.0)),
        ])),
    };

    let parts: Vec<String> = [
        ("translate", translate.as_ref()),
        ("rotate", attrs.get("rotate")),
        ("scale", attrs.get("scale")),
    ]
    .into_iter()
    .filter_map(|(name, value)| transform_component(name, value?))
    .collect();

    let mut canonical: Attributes = attrs
        .iter()
        .filter(|(key, _)| !TRANSFORM_KEYS.contains(&key.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if !parts.is_empty() {
        canonical.insert("transform".to_string(), Value::Text(parts.join(" ")));
    }

    shape.with_attrs(canonical)
}

/// Structured colors become `rgba(...)` paint strings
fn canonicalize_colors(shape: &Shape, round_alpha: bool) -> Shape {
    let attrs = shape.attrs();
    if !attrs.values().any(|v| v.as_color().is_some()) {
        return shape.clone();
    }

    let painted = attrs
        .iter()
        .map(|(k, v)| {
            let value = match v {
                Value::Color(color) => Value::Text(color.to_paint_string_with(round_alpha)),
                other => other.clone(),
            };
            (k.clone(), value)
        })
        .collect();
    shape.with_attrs(painted)
}

/// Geometry a kind cannot render without; each entry lists accepted aliases
fn required_geometry(kind: ShapeKind) -> &'static [&'static [&'static str]] {
    match kind {
        ShapeKind::Circle => &[&["r"]],
        ShapeKind::Ellipse => &[&["rx"], &["ry"]],
        ShapeKind::Rect => &[&["width", "w"], &["height", "h"]],
        ShapeKind::RoundedPolygon => &[&["width"], &["r"]],
        ShapeKind::Polygon | ShapeKind::Polyline => &[&["points"]],
        ShapeKind::Path => &[&["d"]],
        ShapeKind::Line
        | ShapeKind::Group
        | ShapeKind::ClipPath
        | ShapeKind::Mask
        | ShapeKind::Text => &[],
    }
}

/// Strict-mode validation
fn validate(shape: &Shape) -> Result<()> {
    let kind = shape.kind();
    let reject = |attribute: &str, reason: &str| {
        warn!(%kind, attribute, reason, "rejecting descriptor");
        MandalaError::InvalidAttribute {
            kind,
            attribute: attribute.to_string(),
            reason: reason.to_string(),
        }
    };

    for aliases in required_geometry(kind) {
        if !aliases.iter().any(|key| is_present(shape.attr(key))) {
            return Err(reject(aliases[0], "required attribute is missing"));
        }
    }

    for (key, value) in shape.attrs() {
        if let Some(n) = value.as_number() {
            if !n.is_finite() {
                return Err(reject(key, "must be a finite number"));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::builders::{circle, group, line, path, polygon, rect};
    use mandala_paint::rgba;

    fn norm(shape: &Shape) -> Shape {
        normalize(shape, &CompileOptions::default()).unwrap()
    }

    fn keys(shape: &Shape) -> Vec<&str> {
        shape.attrs().keys().map(String::as_str).collect()
    }

    #[test]
    fn rect_center_becomes_corner() {
        let shape = norm(&rect(attrs! { cx: 10, cy: 20, w: 4, h: 6 }));
        assert_eq!(shape.number("x"), Some(8.0));
        assert_eq!(shape.number("y"), Some(17.0));
        assert_eq!(shape.number("width"), Some(4.0));
        assert_eq!(shape.attr("cx"), None);
        assert_eq!(shape.attr("w"), None);
    }

    #[test]
    fn explicit_rect_corner_wins() {
        let shape = norm(&rect(attrs! { x: 0, cx: 10, width: 4, height: 4 }));
        assert_eq!(shape.number("x"), Some(0.0));
        assert_eq!(shape.attr("y"), None);
    }

    #[test]
    fn rect_without_width_propagates_nan() {
        let shape = norm(&rect(attrs! { cx: 10 }));
        assert!(shape.number("x").unwrap().is_nan());
    }

    #[test]
    fn line_endpoints_are_decomposed() {
        let shape = norm(&line(attrs! { start: [1.0, 2.0], end: [3.0, 4.0], stroke: "red" }));
        assert_eq!(keys(&shape), ["stroke", "x1", "y1", "x2", "y2"]);
        assert_eq!(shape.number("y2"), Some(4.0));
    }

    #[test]
    fn polygon_points_are_joined() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 7.5)];
        let shape = norm(&polygon(attrs! { points: points }));
        assert_eq!(shape.attr("points"), Some(&Value::from("0,0 10,0 5,7.5")));
    }

    #[test]
    fn transform_order_is_fixed() {
        let shape = norm(&circle(attrs! {
            scale: 2,
            rotate: vec![45.0, 0.0, 0.0],
            translate: [10.0, 20.0],
            r: 1,
        }));
        assert_eq!(
            shape.attr("transform"),
            Some(&Value::from("translate(10,20) rotate(45,0,0) scale(2)"))
        );
        assert_eq!(keys(&shape), ["r", "transform"]);
    }

    #[test]
    fn incomplete_transform_components_are_dropped() {
        let shape = norm(&circle(attrs! {
            rotate: Value::Null,
            scale: vec![Value::from(2), Value::Null],
            translate: [1.0, 1.0],
        }));
        assert_eq!(shape.attr("transform"), Some(&Value::from("translate(1,1)")));

        let untouched = norm(&circle(attrs! { rotate: Value::Null }));
        assert_eq!(untouched.attr("transform"), None);
        assert_eq!(untouched.attr("rotate"), None);
    }

    #[test]
    fn axis_shorthands_merge_into_translate() {
        let shape = norm(&group(Vec::new(), attrs! { translateY: 5 }));
        assert_eq!(shape.attr("transform"), Some(&Value::from("translate(0,5)")));
        assert_eq!(shape.attr("translateY"), None);
    }

    #[test]
    fn colors_become_paint_strings() {
        let shape = norm(&circle(attrs! {
            fill: rgba(255.0, 0.0, 0.0, 1.0),
            stroke: "navy",
            stopColor: rgba(0.4, 0.6, 0.0, 0.3),
        }));
        assert_eq!(shape.attr("fill"), Some(&Value::from("rgba(255,0,0,1)")));
        assert_eq!(shape.attr("stroke"), Some(&Value::from("navy")));
        assert_eq!(shape.attr("stopColor"), Some(&Value::from("rgba(0,1,0,0)")));
    }

    #[test]
    fn alpha_rounding_can_be_disabled() {
        let options = CompileOptions {
            round_alpha: false,
            ..CompileOptions::default()
        };
        let shape = normalize(&circle(attrs! { fill: rgba(1.0, 2.0, 3.0, 0.5) }), &options).unwrap();
        assert_eq!(shape.attr("fill"), Some(&Value::from("rgba(1,2,3,0.5)")));
    }

    #[test]
    fn rounded_polygon_becomes_a_path() {
        let shape = crate::builders::rounded_polygon(attrs! { sides: 3, width: 10, r: 1, fill: "red" });
        let normalized = norm(&shape);
        assert_eq!(normalized.kind(), ShapeKind::Path);
        let Some(Value::Text(d)) = normalized.attr("d") else {
            panic!("path data expected");
        };
        assert!(d.starts_with("M "));
        assert!(d.ends_with(" Z"));
        assert_eq!(d.matches('Q').count(), 3);
        assert!(!d.contains("NaN"));
        assert_eq!(keys(&normalized)[0], "d");
        assert_eq!(normalized.attr("fill"), Some(&Value::from("red")));
    }

    #[test]
    fn pass_through_kinds_only_get_universal_passes() {
        let shape = path(attrs! { d: "M 0 0 L 1 1", fill: "none" });
        assert_eq!(norm(&shape), shape);
    }

    #[test]
    fn strict_mode_rejects_missing_geometry() {
        let err = normalize(&circle(attrs! { fill: "red" }), &CompileOptions::strict()).unwrap_err();
        assert!(matches!(
            err,
            MandalaError::InvalidAttribute { kind: ShapeKind::Circle, ref attribute, .. } if attribute == "r"
        ));
        assert!(normalize(&rect(attrs! { w: 1, h: 2 }), &CompileOptions::strict()).is_ok());
    }

    #[test]
    fn strict_mode_rejects_non_finite_numbers() {
        let err = normalize(&circle(attrs! { r: f64::NAN }), &CompileOptions::strict()).unwrap_err();
        assert!(err.to_string().contains("finite"));
        assert!(normalize(&circle(attrs! { r: f64::NAN }), &CompileOptions::default()).is_ok());
        assert!(normalize(&circle(attrs! { r: "NaN" }), &CompileOptions::strict()).is_err());
    }
}
