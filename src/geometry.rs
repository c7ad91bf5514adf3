// Box, point and interval helpers shared by the resolver. Everything here is
// plain f64 arithmetic; NaN inputs flow through instead of being rejected.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

impl Point {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    pub fn offset(self, by: Point) -> Self {
        Self::new(self.left + by.left, self.top + by.top)
    }

    pub fn minus(self, by: Point) -> Self {
        Self::new(self.left - by.left, self.top - by.top)
    }
}

/// Axis-aligned rectangle in viewport pixels.
///
/// `right` and `bottom` are stored alongside the size because measured boxes
/// carry all six values; `new` keeps them consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundingBoxRepr")]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            right: left + width,
            bottom: top + height,
        }
    }

    /// A box at the origin; overlays are usually measured before they are placed.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    pub fn start_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    pub fn end_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        dimensions_overlap(self.left, self.right, other.left, other.right)
            && dimensions_overlap(self.top, self.bottom, other.top, other.bottom)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundingBoxRepr {
    #[serde(default)]
    left: f64,
    #[serde(default)]
    top: f64,
    width: f64,
    height: f64,
    right: Option<f64>,
    bottom: Option<f64>,
}

impl From<BoundingBoxRepr> for BoundingBox {
    fn from(repr: BoundingBoxRepr) -> Self {
        let mut bbox = BoundingBox::new(repr.left, repr.top, repr.width, repr.height);
        if let Some(right) = repr.right {
            bbox.right = right;
        }
        if let Some(bottom) = repr.bottom {
            bbox.bottom = bottom;
        }
        bbox
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    pub fn of(self, point: Point) -> f64 {
        match self {
            Axis::X => point.left,
            Axis::Y => point.top,
        }
    }
}

/// `min(max(min, val), max)`; when `min > max` the upper bound wins.
/// Any NaN operand yields NaN.
pub fn clamp(min: f64, val: f64, max: f64) -> f64 {
    if min.is_nan() || val.is_nan() || max.is_nan() {
        return f64::NAN;
    }
    min.max(val).min(max)
}

/// Open-interval overlap: touching edges do not count.
pub fn dimensions_overlap(left_one: f64, right_one: f64, left_two: f64, right_two: f64) -> bool {
    right_one > left_two && right_two > left_one
}

/// Moves `val` out of the open range `(boundary_start, boundary_end)`,
/// towards the end when `go_higher` and towards the start otherwise.
pub fn skip_boundary(val: f64, boundary_start: f64, boundary_end: f64, go_higher: bool) -> f64 {
    let is_between = val > boundary_start && val < boundary_end;
    if !is_between {
        return val;
    }
    if go_higher { boundary_end } else { boundary_start }
}
