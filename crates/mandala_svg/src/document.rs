//! In-memory SVG document

use indexmap::IndexMap;
use mandala_core::{RenderBackend, ShapeKind};
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    pub struct SvgNodeId;
}

/// One element of the document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgElement {
    tag: String,
    attributes: IndexMap<String, String>,
    style: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<SvgNodeId>,
    parent: Option<SvgNodeId>,
}

impl SvgElement {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Inline style properties, in the order they were first set
    pub fn style(&self) -> &IndexMap<String, String> {
        &self.style
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[SvgNodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<SvgNodeId> {
        self.parent
    }
}

/// Arena of SVG elements
///
/// Elements are never freed individually; detached elements simply stop
/// being reachable from the root that gets serialized.
#[derive(Clone, Debug, Default)]
pub struct SvgDocument {
    nodes: SlotMap<SvgNodeId, SvgElement>,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create a detached element with an arbitrary tag
    pub fn create_element(&mut self, tag: &str) -> SvgNodeId {
        self.nodes.insert(SvgElement {
            tag: tag.to_string(),
            ..SvgElement::default()
        })
    }

    pub fn get(&self, id: SvgNodeId) -> Option<&SvgElement> {
        self.nodes.get(id)
    }

    /// First direct child of `parent` with the given tag
    pub fn find_child(&self, parent: SvgNodeId, tag: &str) -> Option<SvgNodeId> {
        let element = self.nodes.get(parent)?;
        element
            .children
            .iter()
            .copied()
            .find(|child| self.nodes.get(*child).is_some_and(|c| c.tag == tag))
    }

    pub fn set_attribute(&mut self, id: SvgNodeId, name: &str, value: &str) {
        if let Some(element) = self.nodes.get_mut(id) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_style(&mut self, id: SvgNodeId, property: &str, value: &str) {
        if let Some(element) = self.nodes.get_mut(id) {
            element.style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn set_text(&mut self, id: SvgNodeId, text: &str) {
        if let Some(element) = self.nodes.get_mut(id) {
            element.text = Some(text.to_string());
        }
    }

    /// True when `ancestor` is `node` or one of its parents
    pub fn is_ancestor(&self, ancestor: SvgNodeId, node: SvgNodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|e| e.parent);
        }
        false
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    ///
    /// Appending an element below itself is ignored.
    pub fn append(&mut self, parent: SvgNodeId, child: SvgNodeId) {
        if !self.nodes.contains_key(parent) || self.is_ancestor(child, parent) {
            trace!(?parent, ?child, "ignoring append");
            return;
        }
        let Some(previous) = self.nodes.get_mut(child).map(|c| c.parent.replace(parent)) else {
            return;
        };
        if let Some(old) = previous.and_then(|p| self.nodes.get_mut(p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(element) = self.nodes.get_mut(parent) {
            element.children.push(child);
        }
    }

    /// Serialize the subtree rooted at `root` as SVG markup
    pub fn to_svg_string(&self, root: SvgNodeId) -> String {
        enum Step {
            Open(SvgNodeId),
            Close(SvgNodeId),
        }

        let mut out = String::new();
        let mut stack = vec![Step::Open(root)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(id) => {
                    let Some(element) = self.nodes.get(id) else {
                        continue;
                    };
                    out.push('<');
                    out.push_str(&element.tag);
                    for (name, value) in &element.attributes {
                        push_attribute(&mut out, name, value);
                    }
                    if !element.style.is_empty() {
                        let style = element
                            .style
                            .iter()
                            .map(|(property, value)| format!("{property}: {value}"))
                            .collect::<Vec<_>>()
                            .join("; ");
                        push_attribute(&mut out, "style", &style);
                    }

                    if element.children.is_empty() && element.text.is_none() {
                        out.push_str("/>");
                        continue;
                    }

                    out.push('>');
                    if let Some(text) = &element.text {
                        out.push_str(&escape(text));
                    }
                    stack.push(Step::Close(id));
                    stack.extend(element.children.iter().rev().map(|c| Step::Open(*c)));
                }
                Step::Close(id) => {
                    if let Some(element) = self.nodes.get(id) {
                        out.push_str("</");
                        out.push_str(&element.tag);
                        out.push('>');
                    }
                }
            }
        }

        out
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

/// Escape text for element content and double-quoted attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl RenderBackend for SvgDocument {
    type Node = SvgNodeId;

    fn create_node(&mut self, kind: ShapeKind) -> SvgNodeId {
        let id = self.create_element(kind.tag());
        trace!(?id, tag = kind.tag(), "created svg element");
        id
    }

    fn set_attribute(&mut self, node: &SvgNodeId, name: &str, value: &str) {
        SvgDocument::set_attribute(self, *node, name, value);
    }

    fn append_child(&mut self, parent: &SvgNodeId, child: &SvgNodeId) {
        self.append(*parent, *child);
    }

    fn set_text_content(&mut self, node: &SvgNodeId, text: &str) {
        self.set_text(*node, text);
    }

    fn set_style_override(&mut self, node: &SvgNodeId, property: &str, value: &str) {
        self.set_style(*node, property, value);
    }
}
