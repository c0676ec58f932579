//! Color types and paint-string serialization

use serde::{Deserialize, Serialize};

use crate::format::{fmt_number, round_half_up};

/// RGBA color with r/g/b channels in 0-255 and alpha in [0, 1]
///
/// Serializes as `{"space": "rgb", "r": .., "g": .., "b": .., "a": ..}`.
/// Decoding requires the `space` tag and the three color channels; alpha
/// defaults to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorRepr", into = "ColorRepr")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
enum Space {
    #[serde(rename = "rgb")]
    Rgb,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorRepr {
    space: Space,
    r: f64,
    g: f64,
    b: f64,
    #[serde(default = "opaque")]
    a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        let ColorRepr { space: Space::Rgb, r, g, b, a } = repr;
        Color { r, g, b, a }
    }
}

impl From<Color> for ColorRepr {
    fn from(color: Color) -> Self {
        ColorRepr {
            space: Space::Rgb,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255.0,
        g: 255.0,
        b: 255.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create from u8 components, alpha rescaled into [0, 1]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64 / 255.0,
        }
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { a: alpha, ..self }
    }

    /// Serialize as `rgba(r,g,b,a)` with every channel rounded to an integer.
    ///
    /// Alpha is rounded too; see [`Color::to_paint_string_with`] to keep it
    /// fractional.
    pub fn to_paint_string(&self) -> String {
        self.to_paint_string_with(true)
    }

    pub fn to_paint_string_with(&self, round_alpha: bool) -> String {
        let alpha = if round_alpha {
            round_half_up(self.a)
        } else {
            self.a
        };
        format!(
            "rgba({},{},{},{})",
            fmt_number(round_half_up(self.r)),
            fmt_number(round_half_up(self.g)),
            fmt_number(round_half_up(self.b)),
            fmt_number(alpha)
        )
    }
}

/// Structured color constructor
pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Color {
    Color::new(r, g, b, a)
}
