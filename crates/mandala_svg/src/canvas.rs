//! Canvas helpers
//!
//! A [`Canvas`] is an [`SvgDocument`] with a root `svg` element and the
//! compiler used to render descriptors into it.

use mandala_core::{attribute_name, Attributes, CompileOptions, Compiler, Result, Shape};
use mandala_paint::fmt_number;
use tracing::debug;

use crate::document::{SvgDocument, SvgNodeId};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Root `svg` element plus the document it lives in
#[derive(Clone, Debug)]
pub struct Canvas {
    document: SvgDocument,
    root: SvgNodeId,
    compiler: Compiler,
}

impl Canvas {
    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut SvgDocument {
        &mut self.document
    }

    pub fn root(&self) -> SvgNodeId {
        self.root
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// The whole canvas as SVG markup
    pub fn to_svg_string(&self) -> String {
        self.document.to_svg_string(self.root)
    }
}

/// New canvas with default compile options
pub fn surface(attrs: &Attributes) -> Canvas {
    surface_with(attrs, CompileOptions::default())
}

/// New canvas; root attributes go through the same name conversion and
/// allow-list as descriptor attributes
pub fn surface_with(attrs: &Attributes, options: CompileOptions) -> Canvas {
    let compiler = Compiler::new(options);
    let mut document = SvgDocument::new();
    let root = document.create_element("svg");
    document.set_attribute(root, "xmlns", SVG_NAMESPACE);

    for (key, value) in attrs {
        let name = attribute_name(key);
        if !value.is_null() && compiler.allows(&name) {
            document.set_attribute(root, &name, &value.to_string());
        }
    }

    Canvas {
        document,
        root,
        compiler,
    }
}

/// Compile `shape` and append it to the canvas root
pub fn render(canvas: &mut Canvas, shape: &Shape) -> Result<SvgNodeId> {
    let node = canvas.compiler.compile(shape, &mut canvas.document)?;
    canvas.document.append(canvas.root, node);
    Ok(node)
}

/// Compile `shape` into the canvas `defs` element, creating it on first use
pub fn def(canvas: &mut Canvas, shape: &Shape) -> Result<SvgNodeId> {
    let defs = match canvas.document.find_child(canvas.root, "defs") {
        Some(defs) => defs,
        None => {
            debug!("creating defs element");
            let defs = canvas.document.create_element("defs");
            canvas.document.append(canvas.root, defs);
            defs
        }
    };
    let node = canvas.compiler.compile(shape, &mut canvas.document)?;
    canvas.document.append(defs, node);
    Ok(node)
}

/// Put the origin in the middle of a `width` x `height` viewport
pub fn center_canvas(canvas: &mut Canvas, width: f64, height: f64) {
    let view_box = format!(
        "{} {} {} {}",
        fmt_number(-width / 2.0),
        fmt_number(-height / 2.0),
        fmt_number(width),
        fmt_number(height)
    );
    canvas.document.set_attribute(canvas.root, "viewBox", &view_box);
}

/// Rotate and scale `node` around its own center
pub fn center_origin(canvas: &mut Canvas, node: SvgNodeId) {
    canvas.document.set_style(node, "transform-box", "fill-box");
    canvas.document.set_style(node, "transform-origin", "center");
}
