//! Descriptor compilation
//!
//! Lowers a descriptor tree into calls against a [`RenderBackend`]. Each
//! node is normalized once, its attributes are converted to kebab-case and
//! filtered through the allow-list, and composites are walked with an
//! explicit work stack so nesting depth is bounded by the heap, not the
//! call stack.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::backend::RenderBackend;
use crate::config::CompileOptions;
use crate::error::Result;
use crate::normalize::normalize;
use crate::shape::Shape;
use crate::value::Value;

/// Attribute names the backend accepts
const ALLOWED_ATTRIBUTES: &[&str] = &[
    "class",
    "id",
    "cx",
    "cy",
    "r",
    "rx",
    "ry",
    "x",
    "y",
    "x1",
    "x2",
    "y1",
    "y2",
    "dx",
    "dy",
    "width",
    "height",
    "d",
    "points",
    "fill",
    "fill-rule",
    "fill-opacity",
    "opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "transform",
    "transform-origin",
    "clip-path",
    "mask",
    "viewBox",
    "text-anchor",
    "dominant-baseline",
    "textLength",
    "lengthAdjust",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "letter-spacing",
];

/// Names that stay camelCase on the backend side
const VERBATIM_NAMES: [&str; 3] = ["viewBox", "textLength", "lengthAdjust"];

/// `strokeWidth` -> `stroke-width`
pub fn camel_to_kebab(name: &str) -> String {
    let mut kebab = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            kebab.push('-');
            kebab.push(c.to_ascii_lowercase());
        } else {
            kebab.push(c);
        }
    }
    kebab
}

/// Backend-side name of a descriptor attribute
pub fn attribute_name(key: &str) -> String {
    if VERBATIM_NAMES.contains(&key) {
        key.to_string()
    } else {
        camel_to_kebab(key)
    }
}

enum Task<N> {
    /// Build the node for a descriptor and schedule its children
    Build { shape: Shape, parent: N },
    /// All children are attached; finish the node and attach it
    Finish {
        node: N,
        origin: Option<String>,
        parent: N,
    },
}

/// Compiles descriptors against a backend with fixed options
#[derive(Clone, Debug)]
pub struct Compiler {
    options: CompileOptions,
    allowed: FxHashSet<String>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        let allowed = ALLOWED_ATTRIBUTES
            .iter()
            .map(|name| name.to_string())
            .chain(options.extra_attributes.iter().cloned())
            .collect();
        Self { options, allowed }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Whether a backend-side attribute name passes the allow-list
    pub fn allows(&self, name: &str) -> bool {
        self.allowed.contains(name)
    }

    /// Compile a descriptor tree and return the root node.
    ///
    /// Nodes built before a failing descriptor stay attached to their
    /// parents; compilation is not transactional.
    pub fn compile<B: RenderBackend>(&self, shape: &Shape, backend: &mut B) -> Result<B::Node> {
        debug!(kind = %shape.kind(), "compiling descriptor");

        let root = self.build_node(shape, backend)?;
        let mut stack = Vec::new();
        schedule_children(&mut stack, shape, &root);
        let mut nodes = 1usize;

        while let Some(task) = stack.pop() {
            match task {
                Task::Build { shape, parent } => {
                    let node = self.build_node(&shape, backend)?;
                    nodes += 1;
                    stack.push(Task::Finish {
                        node: node.clone(),
                        origin: origin_of(&shape),
                        parent,
                    });
                    schedule_children(&mut stack, &shape, &node);
                }
                Task::Finish {
                    node,
                    origin,
                    parent,
                } => {
                    relocate_origin(backend, &node, origin.as_deref());
                    backend.append_child(&parent, &node);
                }
            }
        }

        relocate_origin(backend, &root, origin_of(shape).as_deref());
        debug!(nodes, "compile finished");
        Ok(root)
    }

    fn build_node<B: RenderBackend>(&self, shape: &Shape, backend: &mut B) -> Result<B::Node> {
        let normalized = normalize(shape, &self.options)?;
        let node = backend.create_node(normalized.kind());
        trace!(kind = %normalized.kind(), "created node");

        for (key, value) in normalized.attrs() {
            if value.is_null() {
                trace!(attribute = %key, "skipping null attribute");
                continue;
            }
            let name = attribute_name(key);
            if self.allows(&name) {
                backend.set_attribute(&node, &name, &value.to_string());
            } else {
                trace!(attribute = %key, "dropping attribute outside the allow-list");
            }
        }

        if let Some(text) = normalized.text_content() {
            backend.set_text_content(&node, text);
        }

        Ok(node)
    }
}

/// Children are pushed in reverse so they pop in render order
fn schedule_children<N: Clone>(stack: &mut Vec<Task<N>>, shape: &Shape, node: &N) {
    for child in shape.children().iter().rev() {
        stack.push(Task::Build {
            shape: child.clone(),
            parent: node.clone(),
        });
    }
}

fn origin_of(shape: &Shape) -> Option<String> {
    shape.attr("origin").map(Value::to_string)
}

fn relocate_origin<B: RenderBackend>(backend: &mut B, node: &B::Node, origin: Option<&str>) {
    if let Some(origin) = origin {
        backend.set_style_override(node, "transform-box", "fill-box");
        backend.set_style_override(node, "transform-origin", origin);
    }
}

/// Compile with default options
pub fn compile<B: RenderBackend>(shape: &Shape, backend: &mut B) -> Result<B::Node> {
    Compiler::default().compile(shape, backend)
}
