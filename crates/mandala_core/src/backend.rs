//! Render backend contract
//!
//! The compiler only ever talks to a [`RenderBackend`]. [`Recorder`] is a
//! backend that keeps a flat log of every call, which is what tests compare.

use crate::shape::ShapeKind;

/// Receiver of compiled descriptors
pub trait RenderBackend {
    /// Handle to a node owned by the backend
    type Node: Clone;

    fn create_node(&mut self, kind: ShapeKind) -> Self::Node;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    fn set_text_content(&mut self, node: &Self::Node, text: &str);

    /// Inline style property, used to relocate the transform origin
    fn set_style_override(&mut self, node: &Self::Node, property: &str, value: &str);
}

/// A single recorded backend call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    CreateNode {
        node: usize,
        kind: ShapeKind,
    },
    SetAttribute {
        node: usize,
        name: String,
        value: String,
    },
    AppendChild {
        parent: usize,
        child: usize,
    },
    SetTextContent {
        node: usize,
        text: String,
    },
    SetStyleOverride {
        node: usize,
        property: String,
        value: String,
    },
}

/// Backend that records calls instead of drawing
///
/// Node handles are sequential indices starting at 0.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    calls: Vec<BackendCall>,
    next_node: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Take ownership of recorded calls; node numbering continues
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of nodes created so far
    pub fn node_count(&self) -> usize {
        self.next_node
    }

    /// Kind a node was created with
    pub fn kind_of(&self, node: usize) -> Option<ShapeKind> {
        self.calls.iter().find_map(|call| match call {
            BackendCall::CreateNode { node: n, kind } if *n == node => Some(*kind),
            _ => None,
        })
    }

    /// Attributes set on a node, in call order
    pub fn attributes_of(&self, node: usize) -> Vec<(&str, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::SetAttribute { node: n, name, value } if *n == node => {
                    Some((name.as_str(), value.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Children appended to a node, in call order
    pub fn children_of(&self, node: usize) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::AppendChild { parent, child } if *parent == node => Some(*child),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for Recorder {
    type Node = usize;

    fn create_node(&mut self, kind: ShapeKind) -> usize {
        let node = self.next_node;
        self.next_node += 1;
        self.calls.push(BackendCall::CreateNode { node, kind });
        node
    }

    fn set_attribute(&mut self, node: &usize, name: &str, value: &str) {
        self.calls.push(BackendCall::SetAttribute {
            node: *node,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn append_child(&mut self, parent: &usize, child: &usize) {
        self.calls.push(BackendCall::AppendChild {
            parent: *parent,
            child: *child,
        });
    }

    fn set_text_content(&mut self, node: &usize, text: &str) {
        self.calls.push(BackendCall::SetTextContent {
            node: *node,
            text: text.to_string(),
        });
    }

    fn set_style_override(&mut self, node: &usize, property: &str, value: &str) {
        self.calls.push(BackendCall::SetStyleOverride {
            node: *node,
            property: property.to_string(),
            value: value.to_string(),
        });
    }
}
