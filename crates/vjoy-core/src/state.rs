use crate::direction::Direction;
use crate::fade::Fade;
use crate::geometry::{Displacement, Point};

/// Live state of the joystick, derived from the style and the latest sample.
///
/// Positions are local surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    /// A gesture is engaged.
    pub active: bool,
    /// Centre of the handle disc; within `outer_radius` of the anchor.
    pub handle: Point,
    /// Radians, `atan2` convention.
    pub angle: f32,
    /// Distance from the anchor, clamped to `outer_radius`.
    pub magnitude: f32,
    pub direction: Direction,
    pub visible: bool,
    /// Global paint opacity, `0.0..=1.0`.
    pub opacity: f32,
    pub fade: Fade,
}

impl PointerState {
    pub fn new(anchor: Point, visible: bool, fade_duration: u32) -> Self {
        Self {
            active: false,
            handle: anchor,
            angle: 0.0,
            magnitude: 0.0,
            direction: Direction::Center,
            visible,
            opacity: 1.0,
            fade: Fade::new(fade_duration),
        }
    }

    /// Put the handle back on the anchor and zero the drag data.
    pub fn reset(&mut self, anchor: Point) {
        self.handle = anchor;
        self.angle = 0.0;
        self.magnitude = 0.0;
        self.direction = Direction::Center;
    }

    /// Apply a clamped drag relative to `anchor`.
    pub fn apply(&mut self, anchor: Point, d: Displacement) {
        self.handle = anchor + d.offset;
        self.angle = d.angle;
        self.magnitude = d.magnitude;
        self.direction = Direction::from_polar(d.angle, d.magnitude);
    }
}
