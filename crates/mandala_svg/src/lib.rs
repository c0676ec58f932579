//! Mandala SVG
//!
//! An in-memory SVG document that implements the descriptor render backend,
//! plus canvas helpers for building standalone SVG files.
//!
//! ```rust
//! use mandala_core::{attrs, circle};
//! use mandala_svg::{center_canvas, render, surface};
//!
//! let mut canvas = surface(&attrs! { width: 100, height: 100 });
//! center_canvas(&mut canvas, 100.0, 100.0);
//! render(&mut canvas, &circle(attrs! { r: 10, fill: "gold" }))?;
//! assert!(canvas.to_svg_string().contains(r#"<circle r="10" fill="gold"/>"#));
//! # Ok::<(), mandala_core::MandalaError>(())
//! ```

pub mod canvas;
pub mod document;

pub use canvas::{
    center_canvas, center_origin, def, render, surface, surface_with, Canvas, SVG_NAMESPACE,
};
pub use document::{escape, SvgDocument, SvgElement, SvgNodeId};
