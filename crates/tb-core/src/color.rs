//! Colors for player markers and pen strokes.
//!
//! Accepts the CSS-style notations a browser host hands over: hex
//! (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`), `rgb()`/`rgba()` and
//! `hsl()`/`hsla()` in both the comma and the space-separated syntax.
//! Parsing is built on `winnow` 0.7. Colors always serialize as hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use winnow::ascii::{Caseless, float, space0, space1};
use winnow::combinator::{alt, opt, preceded, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
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

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Build from hue in degrees, saturation and lightness in `0.0..=1.0`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Self::rgba(r + m, g + m, b + m, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let digits = hex
            .bytes()
            .map(hex_val)
            .collect::<Option<Vec<u8>>>()?;

        let channel = |hi: u8, lo: u8| (hi << 4 | lo) as f32 / 255.0;
        match digits.as_slice() {
            &[r, g, b] => Some(Self::rgba(
                channel(r, r),
                channel(g, g),
                channel(b, b),
                1.0,
            )),
            &[r, g, b, a] => Some(Self::rgba(
                channel(r, r),
                channel(g, g),
                channel(b, b),
                channel(a, a),
            )),
            &[r1, r2, g1, g2, b1, b2] => Some(Self::rgba(
                channel(r1, r2),
                channel(g1, g2),
                channel(b1, b2),
                1.0,
            )),
            &[r1, r2, g1, g2, b1, b2, a1, a2] => Some(Self::rgba(
                channel(r1, r2),
                channel(g1, g2),
                channel(b1, b2),
                channel(a1, a2),
            )),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Parse any supported CSS-style color notation.
    pub fn parse(text: &str) -> Result<Self, String> {
        color_expr
            .parse(text.trim())
            .map_err(|e| format!("invalid color {text:?}: {e}"))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Parsers ─────────────────────────────────────────────────────────────

fn color_expr(input: &mut &str) -> ModalResult<Color> {
    alt((hex_color, rgb_fn, hsl_fn)).parse_next(input)
}

fn hex_color(input: &mut &str) -> ModalResult<Color> {
    preceded('#', take_while(3..=8, |c: char| c.is_ascii_hexdigit()))
        .verify_map(Color::from_hex)
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<f32> {
    float.verify(|v: &f32| v.is_finite()).parse_next(input)
}

fn percent(input: &mut &str) -> ModalResult<f32> {
    terminated(number, '%').parse_next(input)
}

/// Argument separator: a comma with optional padding, or bare whitespace.
fn separator(input: &mut &str) -> ModalResult<()> {
    alt(((space0, ',', space0).void(), space1.void())).parse_next(input)
}

/// Optional alpha: `, 0.5` / ` / 50%` style trailing argument.
fn alpha_arg(input: &mut &str) -> ModalResult<f32> {
    preceded(
        alt(((space0, '/', space0).void(), separator)),
        alt((percent.map(|p| p / 100.0), number)),
    )
    .parse_next(input)
}

/// `name(` or `namea(`, case-insensitive.
fn open_call(name: &'static str) -> impl FnMut(&mut &str) -> ModalResult<()> {
    move |input: &mut &str| {
        (Caseless(name), opt(Caseless("a")), '(', space0)
            .void()
            .parse_next(input)
    }
}

fn close_paren(input: &mut &str) -> ModalResult<()> {
    (space0, ')').void().parse_next(input)
}

fn degrees_unit(input: &mut &str) -> ModalResult<()> {
    opt(Caseless("deg")).void().parse_next(input)
}

fn rgb_fn(input: &mut &str) -> ModalResult<Color> {
    open_call("rgb").parse_next(input)?;
    let r = number.parse_next(input)?;
    separator.parse_next(input)?;
    let g = number.parse_next(input)?;
    separator.parse_next(input)?;
    let b = number.parse_next(input)?;
    let alpha = opt(alpha_arg).parse_next(input)?;
    close_paren.parse_next(input)?;

    let channel = |v: f32| v.clamp(0.0, 255.0) / 255.0;
    Ok(Color::rgba(channel(r), channel(g), channel(b), 1.0).with_alpha(alpha.unwrap_or(1.0)))
}

fn hsl_fn(input: &mut &str) -> ModalResult<Color> {
    open_call("hsl").parse_next(input)?;
    let hue = number.parse_next(input)?;
    degrees_unit.parse_next(input)?;
    separator.parse_next(input)?;
    let saturation = percent.parse_next(input)?;
    separator.parse_next(input)?;
    let lightness = percent.parse_next(input)?;
    let alpha = opt(alpha_arg).parse_next(input)?;
    close_paren.parse_next(input)?;

    Ok(Color::from_hsl(hue, saturation / 100.0, lightness / 100.0)
        .with_alpha(alpha.unwrap_or(1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(Color::parse("#000").unwrap().to_hex(), "#000000");
        assert_eq!(Color::parse("#FF0000").unwrap().to_hex(), "#FF0000");
        assert_eq!(Color::parse("#ff000080").unwrap().to_hex(), "#FF000080");
        assert_eq!(Color::parse("  #abc ").unwrap().to_hex(), "#AABBCC");
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#GGGGGG").is_err());
    }

    #[test]
    fn hsl_space_syntax_from_saved_boards() {
        // id 1 → hue 73
        let c = Color::parse("hsl(73 80% 55%)").unwrap();
        assert_eq!(c, Color::from_hsl(73.0, 0.8, 0.55));
        assert_eq!(c.to_hex(), "#C0E830");
    }

    #[test]
    fn hsl_comma_syntax_and_alpha() {
        let c = Color::parse("hsla(0, 100%, 50%, 0.5)").unwrap();
        assert_eq!(c.to_hex(), "#FF000080");
        let c = Color::parse("hsl(120deg 100% 25% / 100%)").unwrap();
        assert_eq!(c.to_hex(), "#008000");
    }

    #[test]
    fn rgb_syntax() {
        assert_eq!(Color::parse("rgb(255, 128, 0)").unwrap().to_hex(), "#FF8000");
        assert_eq!(Color::parse("RGB(0 0 255)").unwrap().to_hex(), "#0000FF");
        assert!(Color::parse("rgb(1, 2)").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse("").is_err());
        assert!(Color::parse("red").is_err());
        assert!(Color::parse("hsl(10 20 30)").is_err());
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(
            Color::from_hsl(360.0 + 73.0, 0.8, 0.55).to_hex(),
            Color::from_hsl(73.0, 0.8, 0.55).to_hex()
        );
    }

    #[test]
    fn serde_accepts_any_form_emits_hex() {
        let c: Color = serde_json::from_str("\"hsl(0 100% 50%)\"").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#FF0000\"");
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
