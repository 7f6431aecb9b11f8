//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a single `PointerSample`
//! consumed by the joystick state machine. Platform adapters only
//! extract a viewport coordinate and a phase.

use crate::error::ConfigError;
use crate::geometry::Point;
use std::str::FromStr;

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mouse down, touch start.
    Begin,
    /// Mouse move, touch move.
    Move,
    /// Mouse up, touch end.
    End,
}

/// A normalized input sample in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub phase: Phase,
}

impl PointerSample {
    pub fn begin(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            phase: Phase::Begin,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            phase: Phase::Move,
        }
    }

    /// Release carries no meaningful position; touch-end has no active touch left.
    pub fn end() -> Self {
        Self {
            position: Point::ZERO,
            phase: Phase::End,
        }
    }
}

/// Which family of platform events drives the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputModality {
    Mouse,
    Touch,
    /// Touch when the platform supports it, mouse otherwise.
    #[default]
    Auto,
}

impl InputModality {
    /// Resolve `Auto` against the platform's touch support.
    pub fn resolve(self, touch_supported: bool) -> Self {
        match self {
            InputModality::Auto if touch_supported => InputModality::Touch,
            InputModality::Auto => InputModality::Mouse,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputModality::Mouse => "mouse",
            InputModality::Touch => "touch",
            InputModality::Auto => "default",
        }
    }
}

impl FromStr for InputModality {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mouse" => Ok(InputModality::Mouse),
            "touch" => Ok(InputModality::Touch),
            "default" => Ok(InputModality::Auto),
            _ => Err(ConfigError::UnsupportedModality(s.to_string())),
        }
    }
}
