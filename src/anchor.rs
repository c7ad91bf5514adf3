// Named anchors and explicit coordinates, and their resolution to pixel
// offsets within a bounding box.

use crate::geometry::{BoundingBox, Point};
use crate::warning::warning;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)$").unwrap()
});
static RADIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0(?P<radix>[xXoObB])(?P<digits>[0-9a-fA-F]+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedAnchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl NamedAnchor {
    pub const ALL: [NamedAnchor; 9] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    /// Expects an already lowercased name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top-left" => Some(Self::TopLeft),
            "top" => Some(Self::Top),
            "top-right" => Some(Self::TopRight),
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom" => Some(Self::Bottom),
            "bottom-right" => Some(Self::BottomRight),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::BottomLeft => "bottom-left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Fractional `(x, y)` point of a box, each in `[0, 1]`.
    pub fn fractions(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::Top => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::Left => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::Right => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }
}

/// One axis of an explicit coordinate pair: a fraction of the box dimension,
/// or text such as `"12px"`, `"50%"` or `"0.25"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Fraction(f64),
    Text(String),
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Self::Fraction(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Where on a box to anchor: used both for the target's anchor point and
/// for the overlay's origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    Named(NamedAnchor),
    Coordinates(Coordinate, Coordinate),
}

impl Position {
    /// Lowercases `name` before lookup. The empty name means "not given" and
    /// yields `None`; an unrecognised name falls back to `top-left`.
    pub fn parse(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        let normalized = name.to_lowercase();
        let anchor = match NamedAnchor::from_name(&normalized) {
            Some(anchor) => anchor,
            None => {
                warning(
                    &format!("unknown anchor `{name}`, falling back to `top-left`"),
                    &format!("anchor:{normalized}"),
                );
                NamedAnchor::TopLeft
            }
        };
        Some(Self::Named(anchor))
    }

    pub fn coordinates(x: impl Into<Coordinate>, y: impl Into<Coordinate>) -> Self {
        Self::Coordinates(x.into(), y.into())
    }

    pub fn named(&self) -> Option<NamedAnchor> {
        match self {
            Self::Named(anchor) => Some(*anchor),
            Self::Coordinates(..) => None,
        }
    }

    /// Pixel offset of this position from `bbox`'s own top-left corner.
    pub fn resolve(&self, bbox: &BoundingBox) -> Point {
        match self {
            Self::Named(anchor) => {
                let (fx, fy) = anchor.fractions();
                resolve_pixels(&Coordinate::Fraction(fx), &Coordinate::Fraction(fy), bbox)
            }
            Self::Coordinates(x, y) => resolve_pixels(x, y, bbox),
        }
    }
}

impl From<NamedAnchor> for Position {
    fn from(anchor: NamedAnchor) -> Self {
        Self::Named(anchor)
    }
}

pub fn resolve_pixels(x: &Coordinate, y: &Coordinate, bbox: &BoundingBox) -> Point {
    Point::new(resolve_axis(x, bbox.width), resolve_axis(y, bbox.height))
}

/// Never fails: unparsable text and NaN fractions resolve to 0.
pub fn resolve_axis(value: &Coordinate, dimension: f64) -> f64 {
    match value {
        Coordinate::Fraction(fraction) => {
            if fraction.is_nan() {
                0.0
            } else {
                fraction * dimension
            }
        }
        Coordinate::Text(text) => {
            let resolved = if text.contains("px") {
                parse_number(&text.replacen("px", "", 1))
            } else if text.contains('%') {
                parse_number(&text.replacen('%', "", 1)) * dimension / 100.0
            } else {
                parse_number(text) * dimension
            };
            if resolved.is_nan() { 0.0 } else { resolved }
        }
    }
}

/// Numeric text in the lenient form browsers accept for style values:
/// surrounding whitespace is ignored, blank text is zero, and `0x`/`0o`/`0b`
/// integers are allowed. Anything else is NaN.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if DECIMAL_RE.is_match(trimmed) {
        return match trimmed.trim_start_matches(['+', '-']) {
            "Infinity" if trimmed.starts_with('-') => f64::NEG_INFINITY,
            "Infinity" => f64::INFINITY,
            _ => trimmed.parse().unwrap_or(f64::NAN),
        };
    }
    let Some(caps) = RADIX_RE.captures(trimmed) else {
        return f64::NAN;
    };
    let radix = match &caps["radix"] {
        "x" | "X" => 16,
        "o" | "O" => 8,
        _ => 2,
    };
    caps["digits"]
        .chars()
        .try_fold(0.0f64, |acc, ch| {
            ch.to_digit(radix)
                .map(|digit| acc * f64::from(radix) + f64::from(digit))
        })
        .unwrap_or(f64::NAN)
}
