//! Styling vocabulary for descriptors: colors, line styles, markers, and the
//! one-or-many wrapper used for cyclable attributes.
//!
//! Cycling rules used by the renderer:
//! - colors and markers: `seq[i % len]` (plain per-series modulo)
//! - line styles: `seq[(i / len) % len]` (consecutive series share a style
//!   until the color cycle wraps)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Series color: a named base color or an explicit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Red,
    Cyan,
    Magenta,
    Yellow,
    Black,
    Rgb(Rgb8),
}

impl Color {
    pub fn rgb(self) -> Rgb8 {
        match self {
            Color::Blue => Rgb8::new(0, 0, 255),
            Color::Green => Rgb8::new(0, 128, 0),
            Color::Red => Rgb8::new(255, 0, 0),
            Color::Cyan => Rgb8::new(0, 191, 191),
            Color::Magenta => Rgb8::new(191, 0, 191),
            Color::Yellow => Rgb8::new(191, 191, 0),
            Color::Black => Rgb8::new(0, 0, 0),
            Color::Rgb(c) => c,
        }
    }
}

impl From<Rgb8> for Color {
    fn from(c: Rgb8) -> Self {
        Color::Rgb(c)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(Rgb8::new(r, g, b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Blue => f.write_str("blue"),
            Color::Green => f.write_str("green"),
            Color::Red => f.write_str("red"),
            Color::Cyan => f.write_str("cyan"),
            Color::Magenta => f.write_str("magenta"),
            Color::Yellow => f.write_str("yellow"),
            Color::Black => f.write_str("black"),
            Color::Rgb(c) => f.write_str(&c.to_hex()),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Names (`blue`), single-letter codes (`b`) and `#RRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let parse = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
            };
            return match (hex.len(), parse(0), parse(2), parse(4)) {
                (6, Some(r), Some(g), Some(b)) => Ok(Color::Rgb(Rgb8::new(r, g, b))),
                _ => Err(Error::Style(format!("invalid hex color '{s}'"))),
            };
        }
        match s.to_ascii_lowercase().as_str() {
            "blue" | "b" => Ok(Color::Blue),
            "green" | "g" => Ok(Color::Green),
            "red" | "r" => Ok(Color::Red),
            "cyan" | "c" => Ok(Color::Cyan),
            "magenta" | "m" => Ok(Color::Magenta),
            "yellow" | "y" => Ok(Color::Yellow),
            "black" | "k" => Ok(Color::Black),
            _ => Err(Error::Style(format!("unknown color '{s}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineStyle {
    /// `-`
    Solid,
    /// `--`
    Dashed,
    /// `-.`
    DashDot,
    /// `:`
    Dotted,
}

impl LineStyle {
    pub fn symbol(self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::DashDot => "-.",
            LineStyle::Dotted => ":",
        }
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            other => Err(Error::Style(format!("unknown line style '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerStyle {
    /// `,`
    Pixel,
    /// `.`
    Point,
    /// `o`
    Circle,
    /// `v`
    TriangleDown,
    /// `^`
    TriangleUp,
    /// `<`
    TriangleLeft,
    /// `>`
    TriangleRight,
    /// `s`
    Square,
    /// `p`
    Pentagon,
    /// `*`
    Star,
    /// `D`
    Diamond,
    /// `d`
    ThinDiamond,
}

impl MarkerStyle {
    pub fn symbol(self) -> char {
        match self {
            MarkerStyle::Pixel => ',',
            MarkerStyle::Point => '.',
            MarkerStyle::Circle => 'o',
            MarkerStyle::TriangleDown => 'v',
            MarkerStyle::TriangleUp => '^',
            MarkerStyle::TriangleLeft => '<',
            MarkerStyle::TriangleRight => '>',
            MarkerStyle::Square => 's',
            MarkerStyle::Pentagon => 'p',
            MarkerStyle::Star => '*',
            MarkerStyle::Diamond => 'D',
            MarkerStyle::ThinDiamond => 'd',
        }
    }
}

impl FromStr for MarkerStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "," => Ok(MarkerStyle::Pixel),
            "." => Ok(MarkerStyle::Point),
            "o" => Ok(MarkerStyle::Circle),
            "v" => Ok(MarkerStyle::TriangleDown),
            "^" => Ok(MarkerStyle::TriangleUp),
            "<" => Ok(MarkerStyle::TriangleLeft),
            ">" => Ok(MarkerStyle::TriangleRight),
            "s" => Ok(MarkerStyle::Square),
            "p" => Ok(MarkerStyle::Pentagon),
            "*" => Ok(MarkerStyle::Star),
            "D" => Ok(MarkerStyle::Diamond),
            "d" => Ok(MarkerStyle::ThinDiamond),
            other => Err(Error::Style(format!("unknown marker style '{other}'"))),
        }
    }
}

/// A styling attribute given either as a single value or as a sequence.
///
/// Descriptors normalise both forms into a sequence with [`OneOrMany::into_vec`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(vs) => vs,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(vs: Vec<T>) -> Self {
        OneOrMany::Many(vs)
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(vs: [T; N]) -> Self {
        OneOrMany::Many(vs.into())
    }
}

impl From<Color> for OneOrMany<Color> {
    fn from(v: Color) -> Self {
        OneOrMany::One(v)
    }
}

impl From<LineStyle> for OneOrMany<LineStyle> {
    fn from(v: LineStyle) -> Self {
        OneOrMany::One(v)
    }
}

impl From<MarkerStyle> for OneOrMany<MarkerStyle> {
    fn from(v: MarkerStyle) -> Self {
        OneOrMany::One(v)
    }
}

pub fn default_colors() -> Vec<Color> {
    vec![
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
        Color::Black,
    ]
}

pub fn default_line_styles() -> Vec<LineStyle> {
    vec![
        LineStyle::Solid,
        LineStyle::Dashed,
        LineStyle::DashDot,
        LineStyle::Dotted,
    ]
}

/// `seq[index % len]`, or `None` for an empty sequence.
pub fn cycle<T: Copy>(seq: &[T], index: usize) -> Option<T> {
    seq.get(index.checked_rem(seq.len())?).copied()
}

/// `seq[(index / len) % len]`, or `None` for an empty sequence.
pub fn cycle_grouped<T: Copy>(seq: &[T], index: usize) -> Option<T> {
    let len = seq.len();
    seq.get(index.checked_div(len)?.checked_rem(len)?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_parse() {
        assert_eq!("b".parse::<Color>().unwrap(), Color::Blue);
        assert_eq!("Black".parse::<Color>().unwrap(), Color::Black);
        assert_eq!(
            "#4472C4".parse::<Color>().unwrap(),
            Color::Rgb(Rgb8::new(68, 114, 196))
        );
        assert!("#44".parse::<Color>().is_err());
        assert!("teal".parse::<Color>().is_err());
        assert_eq!(Color::Rgb(Rgb8::new(1, 2, 255)).to_string(), "#0102FF");
    }

    #[test]
    fn grouped_cycle_holds_style_across_consecutive_series() {
        let styles = default_line_styles();
        let picked: Vec<_> = (0..6).map(|i| cycle_grouped(&styles, i).unwrap()).collect();
        assert_eq!(picked[0], LineStyle::Solid);
        assert_eq!(picked[3], LineStyle::Solid);
        assert_eq!(picked[4], LineStyle::Dashed);
        assert_eq!(picked[5], LineStyle::Dashed);
        assert_eq!(cycle(&styles, 5), Some(LineStyle::Dashed));
        assert_eq!(cycle::<LineStyle>(&[], 1), None);
        assert_eq!(cycle_grouped::<LineStyle>(&[], 1), None);
    }

    #[test]
    fn markers_round_trip_symbols() {
        for sym in [",", ".", "o", "v", "^", "<", ">", "s", "p", "*", "D", "d"] {
            let m: MarkerStyle = sym.parse().unwrap();
            assert_eq!(m.symbol().to_string(), sym);
        }
    }
}
