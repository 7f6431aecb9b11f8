//! Render surface abstraction.
//!
//! A surface is any 2D target that can clear, paint circles and lines, and
//! keep a save/restore stack of paint state. The Canvas2D backend lives in
//! `vjoy-wasm`, the Vello backend in `vjoy-render`.

use crate::geometry::Point;
use crate::paint::DrawOp;

/// An addressable 2D drawing target.
///
/// Colours are CSS strings; backends that need numeric colours parse them
/// with [`crate::parse_css_color`].
pub trait Surface {
    /// Clear the rectangle `(0, 0, width, height)`.
    fn clear(&mut self, width: f32, height: f32);

    /// Push the current paint state (global alpha).
    fn save(&mut self);

    /// Pop the paint state pushed by the matching `save`.
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f32);

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str);

    fn stroke_circle(&mut self, center: Point, radius: f32, color: &str, width: f32);
}

/// Surface that records every call. Used by tests and headless hosts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded ops.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Ops that actually put pixels down (lines and circles).
    pub fn paint_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| op.is_paint())
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::GlobalAlpha(alpha));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color: color.to_string(),
            width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: &str, width: f32) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            color: color.to_string(),
            width,
        });
    }
}
