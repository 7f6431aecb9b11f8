//! 2D points and polar displacement.
//!
//! Everything here is in surface pixels with the y axis pointing down,
//! the same convention as Canvas2D and DOM client coordinates.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point or offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f32 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, scalar: f32) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Polar form of an offset, clamped to a maximum radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    /// `atan2(d.y, d.x)`, in (−π, π].
    pub angle: f32,
    /// `min(|d|, max_radius)`.
    pub magnitude: f32,
    /// Offset from the anchor to the clamped handle position.
    pub offset: Point,
}

/// Convert a raw offset `d` into an angle and a magnitude clamped to `max_radius`.
///
/// The returned `offset` lies on the ray from the origin through `d`.
/// A zero offset yields angle `0.0` and magnitude `0.0`.
pub fn polar_clamp(d: Point, max_radius: f32) -> Displacement {
    let length = d.length();
    let magnitude = length.min(max_radius.max(0.0));
    let angle = d.y.atan2(d.x);
    let offset = Point::new(angle.cos() * magnitude, angle.sin() * magnitude);
    Displacement {
        angle,
        magnitude,
        offset,
    }
}
