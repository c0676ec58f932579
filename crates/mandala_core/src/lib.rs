//! Mandala Core
//!
//! Declarative vector-graphics descriptors. Builders produce immutable
//! [`Shape`] trees, combinators derive new trees from old ones, and the
//! [`Compiler`] normalizes each node and lowers the tree onto a
//! [`RenderBackend`].
//!
//! # Example
//!
//! ```rust
//! use mandala_core::{attrs, circle, compile, ring, Recorder, Vec2};
//!
//! let petals = ring(&circle(attrs! { r: 2, fill: "teal" }), 50.0, 6, Vec2::ZERO);
//!
//! let mut recorder = Recorder::new();
//! let root = compile(&petals, &mut recorder)?;
//! assert_eq!(recorder.children_of(root).len(), 6);
//! # Ok::<(), mandala_core::MandalaError>(())
//! ```

pub mod backend;
pub mod builders;
pub mod combinators;
pub mod compile;
pub mod config;
pub mod error;
pub mod normalize;
pub mod scene;
pub mod sequence;
pub mod shape;
pub mod value;

pub use backend::{BackendCall, Recorder, RenderBackend};
pub use builders::{
    capsule, circle, clip_path, ellipse, group, line, mask, mirror, path, polygon, polyline,
    rect, reflect, reg_poly, rotate, rounded_polygon, scale, text, translate, Axis, Contents,
};
pub use combinators::{
    col, gmap, grid, parametrize_in, parametrize_on, randomize_in, randomize_on, repeatedly,
    replicate, ring, row, sample,
};
pub use compile::{attribute_name, camel_to_kebab, compile, Compiler};
pub use config::CompileOptions;
pub use error::{MandalaError, Result};
pub use normalize::normalize;
pub use scene::SceneNode;
pub use sequence::{color_steps, random, range, steps, steps_fn, RandomOptions};
pub use shape::{Attributes, Body, Shape, ShapeKind};
pub use value::{Param, Sampler, Value};

pub use mandala_paint::{
    circle_point, deg_to_rad, rad_to_deg, rgba, ring_points, Color, ColorResolutionError,
    ColorResolver, CssColors, Vec2,
};
