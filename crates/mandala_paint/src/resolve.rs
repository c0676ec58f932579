//! Color-name resolution
//!
//! Turning a paint string such as `"tomato"` or `"#ff000080"` into numeric
//! channels is a platform concern. [`ColorResolver`] is the seam; the
//! [`CssColors`] resolver covers hex notation, `rgb()` / `rgba()` and the
//! CSS named colors without needing a live document.

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, hex_digit1, multispace0},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use thiserror::Error;
use tracing::trace;

use crate::color::Color;

/// A color string that could not be resolved
#[derive(Error, Debug, Clone, PartialEq)]
#[error("no color found for `{name}`")]
pub struct ColorResolutionError {
    pub name: String,
}

impl ColorResolutionError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Resolves a color string into numeric channels
pub trait ColorResolver {
    fn resolve(&self, name: &str) -> Result<Color, ColorResolutionError>;
}

impl<F> ColorResolver for F
where
    F: Fn(&str) -> Result<Color, ColorResolutionError>,
{
    fn resolve(&self, name: &str) -> Result<Color, ColorResolutionError> {
        self(name)
    }
}

/// Resolver for CSS color syntax
#[derive(Clone, Copy, Debug, Default)]
pub struct CssColors;

impl ColorResolver for CssColors {
    fn resolve(&self, name: &str) -> Result<Color, ColorResolutionError> {
        let input = name.trim();
        let parsed = if input.starts_with('#') {
            full(parse_hex, input)
        } else if input
            .get(..3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("rgb"))
        {
            full(parse_functional, input)
        } else {
            named_color(input)
        };
        trace!(name, resolved = ?parsed, "resolving color");
        parsed.ok_or_else(|| ColorResolutionError::new(name))
    }
}

/// Run a parser and require it to consume the whole input
fn full(parser: fn(&str) -> IResult<&str, Option<Color>>, input: &str) -> Option<Color> {
    match parser(input) {
        Ok((rest, color)) if rest.trim().is_empty() => color,
        _ => None,
    }
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
fn parse_hex(input: &str) -> IResult<&str, Option<Color>> {
    let (input, hex) = preceded(char('#'), hex_digit1)(input)?;

    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let channels = match hex.len() {
        3 => (digit(0), digit(1), digit(2), Some(255)),
        4 => (digit(0), digit(1), digit(2), digit(3)),
        6 => (byte(0), byte(2), byte(4), Some(255)),
        8 => (byte(0), byte(2), byte(4), byte(6)),
        _ => return Ok((input, None)),
    };

    let color = match channels {
        (Some(r), Some(g), Some(b), Some(a)) => Some(Color::from_rgba8(r, g, b, a)),
        _ => None,
    };
    Ok((input, color))
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)` with channels in 0-255
fn parse_functional(input: &str) -> IResult<&str, Option<Color>> {
    let (input, _) = alt((tag_no_case("rgba"), tag_no_case("rgb")))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, channels) = delimited(
        pair(char('('), multispace0),
        separated_list1(tuple((multispace0, char(','), multispace0)), double),
        pair(multispace0, char(')')),
    )(input)?;

    let color = match channels.as_slice() {
        [r, g, b] => Some(Color::rgb(*r, *g, *b)),
        [r, g, b, a] => Some(Color::new(*r, *g, *b, *a)),
        _ => None,
    };
    Ok((input, color))
}

fn named_color(name: &str) -> Option<Color> {
    let rgb = |r: u8, g: u8, b: u8| Some(Color::from_rgba8(r, g, b, 255));
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "transparent" => Some(Color::TRANSPARENT),
        "red" => rgb(255, 0, 0),
        "green" => rgb(0, 128, 0),
        "lime" => rgb(0, 255, 0),
        "blue" => rgb(0, 0, 255),
        "navy" => rgb(0, 0, 128),
        "yellow" => rgb(255, 255, 0),
        "cyan" | "aqua" => rgb(0, 255, 255),
        "magenta" | "fuchsia" => rgb(255, 0, 255),
        "gray" | "grey" => rgb(128, 128, 128),
        "silver" => rgb(192, 192, 192),
        "maroon" => rgb(128, 0, 0),
        "olive" => rgb(128, 128, 0),
        "purple" => rgb(128, 0, 128),
        "teal" => rgb(0, 128, 128),
        "orange" => rgb(255, 165, 0),
        "gold" => rgb(255, 215, 0),
        "pink" => rgb(255, 192, 203),
        "tomato" => rgb(255, 99, 71),
        "coral" => rgb(255, 127, 80),
        "crimson" => rgb(220, 20, 60),
        "indigo" => rgb(75, 0, 130),
        "violet" => rgb(238, 130, 238),
        "turquoise" => rgb(64, 224, 208),
        "salmon" => rgb(250, 128, 114),
        "khaki" => rgb(240, 230, 140),
        "chocolate" => rgb(210, 105, 30),
        "steelblue" => rgb(70, 130, 180),
        "skyblue" => rgb(135, 206, 235),
        "rebeccapurple" => rgb(102, 51, 153),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_named_colors() {
        assert_eq!(CssColors.resolve("Red"), Ok(Color::rgb(255.0, 0.0, 0.0)));
        assert_eq!(CssColors.resolve(" black "), Ok(Color::BLACK));
    }

    #[test]
    fn resolves_hex_notation() {
        assert_eq!(CssColors.resolve("#f00"), Ok(Color::rgb(255.0, 0.0, 0.0)));
        assert_eq!(
            CssColors.resolve("#00ff00"),
            Ok(Color::rgb(0.0, 255.0, 0.0))
        );
        let half = CssColors.resolve("#0000ff00").unwrap();
        assert_eq!(half.b, 255.0);
        assert_eq!(half.a, 0.0);
    }

    #[test]
    fn resolves_functional_notation() {
        assert_eq!(
            CssColors.resolve("rgb(10, 20, 30)"),
            Ok(Color::rgb(10.0, 20.0, 30.0))
        );
        assert_eq!(
            CssColors.resolve("RGBA(1,2,3,0.5)"),
            Ok(Color::new(1.0, 2.0, 3.0, 0.5))
        );
    }

    #[test]
    fn rejects_unknown_strings() {
        assert_eq!(
            CssColors.resolve("not-a-color"),
            Err(ColorResolutionError::new("not-a-color"))
        );
        assert!(CssColors.resolve("#12345").is_err());
        assert!(CssColors.resolve("rgb(1,2)").is_err());
        assert!(CssColors.resolve("rgb(1,2,3) trailing").is_err());
    }

    #[test]
    fn closures_are_resolvers() {
        let fixed = |_: &str| -> Result<Color, ColorResolutionError> { Ok(Color::WHITE) };
        assert_eq!(fixed.resolve("anything"), Ok(Color::WHITE));
    }
}
