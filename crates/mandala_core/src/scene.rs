//! JSON scene interchange
//!
//! ```json
//! {
//!   "kind": "group",
//!   "attributes": { "rotate": 15 },
//!   "children": [
//!     { "kind": "circle", "attributes": { "r": 10, "fill": "navy" } },
//!     { "kind": "text", "attributes": { "x": 4 }, "text": "hi" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::shape::{Attributes, Body, Shape, ShapeKind};

/// Serialized form of one descriptor node
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SceneNode {
    /// Build the descriptor; fails on the first unknown kind
    pub fn into_shape(self) -> Result<Shape> {
        let kind: ShapeKind = self.kind.parse()?;

        if kind.is_composite() {
            let children = self
                .children
                .into_iter()
                .map(SceneNode::into_shape)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Shape::composite(kind, children, self.attributes));
        }

        if !self.children.is_empty() {
            warn!(%kind, count = self.children.len(), "ignoring children of a leaf");
        }

        Ok(match kind {
            ShapeKind::Text => Shape::text(self.text.unwrap_or_default(), self.attributes),
            _ => Shape::new(kind, self.attributes),
        })
    }
}

impl From<&Shape> for SceneNode {
    fn from(shape: &Shape) -> Self {
        let (children, text) = match shape.body() {
            Body::Empty => (Vec::new(), None),
            Body::Children(children) => (children.iter().map(SceneNode::from).collect(), None),
            Body::Text(text) => (Vec::new(), Some(text.to_string())),
        };
        Self {
            kind: shape.kind().name().to_string(),
            attributes: shape.attrs().clone(),
            children,
            text,
        }
    }
}

impl Shape {
    /// Decode a JSON scene
    pub fn from_json(json: &str) -> Result<Shape> {
        let node: SceneNode = serde_json::from_str(json)?;
        node.into_shape()
    }

    /// Encode as a JSON scene
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&SceneNode::from(self))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::backend::Recorder;
    use crate::builders::{circle, group, reflect, text, Axis};
    use crate::compile::compile;
    use crate::error::MandalaError;
    use crate::value::Value;
    use mandala_paint::{rgba, Vec2};

    #[test]
    fn decodes_nested_scenes() {
        let shape = Shape::from_json(
            r#"{
                "kind": "g",
                "attributes": { "translate": [5, 5] },
                "children": [
                    { "kind": "circle", "attributes": { "r": 10, "fill": "navy" } },
                    { "kind": "text", "text": "hi" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(shape.kind(), ShapeKind::Group);
        assert_eq!(shape.attr("translate"), Some(&Value::Vector(Vec2::new(5.0, 5.0))));
        assert_eq!(shape.children()[0].number("r"), Some(10.0));
        assert_eq!(shape.children()[1].text_content(), Some("hi"));
    }

    #[test]
    fn unknown_kinds_are_parse_errors() {
        let err = Shape::from_json(r#"{ "kind": "group", "children": [{ "kind": "blob" }] }"#)
            .unwrap_err();
        assert!(matches!(err, MandalaError::UnknownShape(ref kind) if kind == "blob"));
        assert_eq!(err.to_string(), "Parse Error: Unknown Shape `blob`");
    }

    #[test]
    fn malformed_json_is_a_scene_error() {
        assert!(matches!(
            Shape::from_json("{ kind: circle }"),
            Err(MandalaError::Scene(_))
        ));
    }

    #[test]
    fn encoding_preserves_structure() {
        let shape = group(
            vec![
                circle(attrs! { r: 3, fill: rgba(0.0, 128.0, 0.0, 1.0) }),
                text("label", attrs! { x: 1 }),
            ],
            attrs! { id: "root" },
        );
        let decoded = Shape::from_json(&shape.to_json().unwrap()).unwrap();
        assert_eq!(decoded, shape);
    }

    #[test]
    fn reflections_survive_encoding() {
        let shape = reflect(&circle(attrs! { r: 1 }), Axis::X);
        let decoded = Shape::from_json(&shape.to_json().unwrap()).unwrap();
        assert_eq!(decoded, shape);
    }

    #[test]
    fn non_finite_numbers_compile_the_same_after_encoding() {
        let shape = circle(attrs! { r: f64::NAN, cx: f64::INFINITY });
        let decoded = Shape::from_json(&shape.to_json().unwrap()).unwrap();

        let mut before = Recorder::new();
        let mut after = Recorder::new();
        compile(&shape, &mut before).unwrap();
        let root = compile(&decoded, &mut after).unwrap();
        assert_eq!(before.calls(), after.calls());
        assert_eq!(after.attributes_of(root), [("r", "NaN"), ("cx", "Infinity")]);
    }

    #[test]
    fn object_attributes_must_be_rgb_colors() {
        let err = Shape::from_json(
            r#"{ "kind": "circle", "attributes": { "r": 1, "fill": { "gradient": "x" } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, MandalaError::Scene(_)));

        let shape = Shape::from_json(
            r#"{ "kind": "circle", "attributes": { "fill": { "space": "rgb", "r": 255, "g": 0, "b": 0 } } }"#,
        )
        .unwrap();
        assert_eq!(shape.attr("fill"), Some(&Value::Color(rgba(255.0, 0.0, 0.0, 1.0))));
    }
}
