//! CSS colour values used by the joystick style.
//!
//! The style keeps colours as the CSS strings the host handed in, so a
//! Canvas2D backend can pass them straight through. Backends that need
//! numeric colours (Vello) go through [`parse_css_color`], built on
//! `winnow` 0.7.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use winnow::ascii::{digit1, space0};
use winnow::combinator::{alt, delimited, opt, preceded, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// An RGBA colour, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            let hi = hex_val(bytes[i])?;
            let lo = hex_val(bytes[i + 1])?;
            Some((hi << 4 | lo) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::new(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::new(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::new(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::new(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Channels as 8-bit values.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// A fill or stroke paint as configured by the host.
///
/// An empty string or `"none"` means the paint operation is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Paint {
    #[default]
    None,
    Css(String),
}

impl Paint {
    pub fn from_css(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            Paint::None
        } else {
            Paint::Css(trimmed.to_string())
        }
    }

    /// The CSS string, or `None` when the paint is transparent.
    pub fn as_css(&self) -> Option<&str> {
        match self {
            Paint::None => None,
            Paint::Css(s) => Some(s),
        }
    }

    /// Numeric colour for backends that cannot take CSS strings.
    pub fn to_rgba(&self) -> Result<Option<Rgba>, ConfigError> {
        self.as_css().map(parse_css_color).transpose()
    }
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_css().unwrap_or("none"))
    }
}

impl<'de> Deserialize<'de> for Paint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Paint::from_css(&s))
    }
}

// ─── CSS colour parser ──────────────────────────────────────────────────

/// Parse a CSS colour string into [`Rgba`].
///
/// Accepts hex forms, `rgb()` / `rgba()` with integer or percentage
/// channels, `transparent`, and the named colours in [`named_color`].
pub fn parse_css_color(input: &str) -> Result<Rgba, ConfigError> {
    let mut rest = input.trim();
    match css_color.parse_next(&mut rest) {
        Ok(color) if rest.is_empty() => Ok(color),
        _ => Err(ConfigError::InvalidColor(input.to_string())),
    }
}

fn css_color(input: &mut &str) -> ModalResult<Rgba> {
    alt((hex_color, functional_color, keyword_color)).parse_next(input)
}

fn hex_color(input: &mut &str) -> ModalResult<Rgba> {
    let digits: &str =
        preceded('#', take_while(3..=8, |c: char| c.is_ascii_hexdigit())).parse_next(input)?;
    Rgba::from_hex(digits).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

fn keyword_color(input: &mut &str) -> ModalResult<Rgba> {
    let name: &str = take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)?;
    named_color(&name.to_ascii_lowercase()).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)`.
fn functional_color(input: &mut &str) -> ModalResult<Rgba> {
    let _ = alt(("rgba", "rgb")).parse_next(input)?;
    let channels: Vec<f32> = delimited(
        ('(', space0),
        separated(3..=4, channel, (space0, ',', space0)),
        (space0, ')'),
    )
    .parse_next(input)?;

    let byte = |v: f32| (v / 255.0).clamp(0.0, 1.0);
    let alpha = channels.get(3).copied().unwrap_or(1.0).clamp(0.0, 1.0);
    Ok(Rgba::new(
        byte(channels[0]),
        byte(channels[1]),
        byte(channels[2]),
        alpha,
    ))
}

/// A number with an optional `%` suffix; percentages map onto `0..=255`.
fn channel(input: &mut &str) -> ModalResult<f32> {
    let value = number.parse_next(input)?;
    let percent = opt('%').parse_next(input)?;
    Ok(match percent {
        Some(_) => value * 2.55,
        None => value,
    })
}

fn number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    let _ = opt('-').parse_next(input)?;
    let _ = alt(((digit1, opt(('.', opt(digit1)))).void(), ('.', digit1).void())).parse_next(input)?;
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f32>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

/// The subset of CSS named colours a joystick skin plausibly uses.
fn named_color(name: &str) -> Option<Rgba> {
    let (r, g, b) = match name {
        "transparent" => return Some(Rgba::TRANSPARENT),
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "gray" | "grey" => (128, 128, 128),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "dimgray" | "dimgrey" => (105, 105, 105),
        "silver" => (192, 192, 192),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        _ => return None,
    };
    Some(Rgba::from_rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_empty_are_transparent_paints() {
        assert_eq!(Paint::from_css("none"), Paint::None);
        assert_eq!(Paint::from_css(" NONE "), Paint::None);
        assert_eq!(Paint::from_css(""), Paint::None);
        assert_eq!(Paint::from_css("#222"), Paint::Css("#222".into()));
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_css_color("#fff").unwrap().to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(parse_css_color("#222").unwrap().to_rgba8(), [34, 34, 34, 255]);
        assert_eq!(parse_css_color("#00ff0080").unwrap().to_rgba8(), [0, 255, 0, 128]);
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(parse_css_color("LightGray").unwrap().to_rgba8(), [211, 211, 211, 255]);
        assert_eq!(parse_css_color("green").unwrap().to_rgba8(), [0, 128, 0, 255]);
        assert_eq!(parse_css_color("transparent").unwrap(), Rgba::TRANSPARENT);
    }

    #[test]
    fn parses_functional_notation() {
        assert_eq!(parse_css_color("rgb(10, 20, 30)").unwrap().to_rgba8(), [10, 20, 30, 255]);
        assert_eq!(
            parse_css_color("rgba(255,0,0,0.5)").unwrap().to_rgba8(),
            [255, 0, 0, 128]
        );
        assert_eq!(parse_css_color("rgb(100%, 0%, 0%)").unwrap().to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_css_color("#12"),
            Err(ConfigError::InvalidColor(_))
        ));
        assert!(parse_css_color("chartreuse-ish").is_err());
        assert!(parse_css_color("rgb(1, 2)").is_err());
    }
}
