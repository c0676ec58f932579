//! Path building and path-data serialization

use std::fmt;

use smallvec::SmallVec;

use crate::geometry::{ring_points, Vec2};

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { control: Vec2, end: Vec2 },
    Close,
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Serialize as path data for a `d` attribute
    pub fn to_path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match command {
                PathCommand::MoveTo(p) => write!(f, "M {p}")?,
                PathCommand::LineTo(p) => write!(f, "L {p}")?,
                PathCommand::QuadTo { control, end } => write!(f, "Q {control} {end}")?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self { path: Path::new() }
    }

    pub fn move_to(mut self, point: Vec2) -> Self {
        self.path.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(mut self, point: Vec2) -> Self {
        self.path.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn quad_to(mut self, control: Vec2, end: Vec2) -> Self {
        self.path.commands.push(PathCommand::QuadTo { control, end });
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One cut corner of a polygon edge walk.
///
/// `vertex` is the polygon vertex the edge starts from, `exit` is the vertex
/// moved `r` along the edge, and `entry` is the next vertex moved `r` back
/// along the same edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    pub vertex: Vec2,
    pub exit: Vec2,
    pub entry: Vec2,
}

/// Corner tuples for the closed edge cycle through `vertices`
pub fn corner_cuts(vertices: &[Vec2], radius: f64) -> Vec<Corner> {
    let count = vertices.len();
    (0..count)
        .map(|i| {
            let v1 = vertices[i];
            let v2 = vertices[(i + 1) % count];
            let inset = (v2 - v1).unit() * radius;
            Corner {
                vertex: v1,
                exit: v1 + inset,
                entry: v2 - inset,
            }
        })
        .collect()
}

/// Regular polygon with corners cut by `corner_radius`.
///
/// The polygon is inscribed in a circle of radius `width / √3` around
/// `center`, starting at 90°. The walk starts at the last edge's entry
/// point; each corner emits a quadratic transition through the vertex
/// followed by a straight run to the next entry point, then closes.
pub fn rounded_polygon(center: Vec2, width: f64, sides: usize, corner_radius: f64) -> Path {
    let radius = width / 3f64.sqrt();
    let vertices = ring_points(radius, sides, center, 90.0);
    let corners = corner_cuts(&vertices, corner_radius);

    let Some(last) = corners.last() else {
        return Path::new();
    };

    corners
        .iter()
        .fold(PathBuilder::new().move_to(last.entry), |path, corner| {
            path.quad_to(corner.vertex, corner.exit).line_to(corner.entry)
        })
        .close()
        .build()
}
