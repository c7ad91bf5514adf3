// Classifies where the anchor sits on the target. The anchor is normalised to
// the box, centred, and turned 45 degrees with the vertical axis flipped, so
// each edge midpoint lands in its own quadrant and each corner on an axis:
//
//   top    -> (+, +)     right  -> (+, -)
//   bottom -> (-, -)     left   -> (-, +)
//
// The sign pair then indexes two static tables.

use crate::anchor::NamedAnchor;
use crate::geometry::{Axis, BoundingBox, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn of(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Self::Positive)
        } else if value < 0.0 {
            Some(Self::Negative)
        } else if value == 0.0 {
            Some(Self::Zero)
        } else {
            None
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Zero => 1,
            Self::Positive => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedPoint {
    pub x: f64,
    pub y: f64,
}

impl RotatedPoint {
    /// `None` when either component is NaN.
    pub fn signs(&self) -> Option<(Sign, Sign)> {
        Some((Sign::of(self.x)?, Sign::of(self.y)?))
    }
}

// Rows are sign(x), columns sign(y), both ordered negative, zero, positive.
const DEFAULT_ORIGINS: [[NamedAnchor; 3]; 3] = [
    [NamedAnchor::Top, NamedAnchor::TopLeft, NamedAnchor::Right],
    [NamedAnchor::TopRight, NamedAnchor::Center, NamedAnchor::TopRight],
    [NamedAnchor::Left, NamedAnchor::TopLeft, NamedAnchor::Bottom],
];

const FIRST_RESOLUTION_AXES: [[Axis; 3]; 3] = [
    [Axis::Y, Axis::Y, Axis::X],
    [Axis::Y, Axis::Y, Axis::Y],
    [Axis::X, Axis::Y, Axis::Y],
];

/// `relative_anchor` is measured from `bbox`'s top-left corner. A zero-sized
/// dimension counts as centred on that axis.
pub fn rotate(relative_anchor: Point, bbox: &BoundingBox) -> RotatedPoint {
    let u = centered_fraction(relative_anchor.left, bbox.width);
    let v = centered_fraction(relative_anchor.top, bbox.height);
    RotatedPoint { x: u - v, y: -u - v }
}

fn centered_fraction(offset: f64, dimension: f64) -> f64 {
    if dimension == 0.0 {
        return 0.0;
    }
    offset / dimension - 0.5
}

/// The overlay anchor that should face the target when no origin is given.
pub fn default_origin(point: RotatedPoint) -> NamedAnchor {
    match point.signs() {
        Some((x, y)) => DEFAULT_ORIGINS[x.index()][y.index()],
        None => NamedAnchor::TopLeft,
    }
}

/// Which axis overlap avoidance settles first.
pub fn first_resolution_axis(point: RotatedPoint) -> Axis {
    match point.signs() {
        Some((x, y)) => FIRST_RESOLUTION_AXES[x.index()][y.index()],
        None => Axis::X,
    }
}
