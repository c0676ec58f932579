//! Mandala Paint Kernel
//!
//! The leaf layer of the Mandala vector-graphics DSL: everything that is
//! pure geometry or pure color, with no knowledge of shape descriptors.
//!
//! # Features
//!
//! - 2D vector arithmetic and ring point generation
//! - Structured RGBA colors and their paint-string form
//! - Color-name resolution behind a trait
//! - Path data building and rounded-polygon synthesis

pub mod color;
pub mod format;
pub mod geometry;
pub mod path;
pub mod resolve;

pub use color::{rgba, Color};
pub use format::{fmt_number, round_half_up};
pub use geometry::{circle_point, deg_to_rad, rad_to_deg, ring_points, Vec2};
pub use path::{corner_cuts, rounded_polygon, Corner, Path, PathBuilder, PathCommand};
pub use resolve::{ColorResolutionError, ColorResolver, CssColors};
