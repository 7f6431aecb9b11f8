//! Canvas2D surface.
//!
//! Replays the joystick draw plan on an HTML `<canvas>` via
//! `CanvasRenderingContext2d`.

use std::f64::consts::TAU;
use vjoy_core::{Point, Surface};
use web_sys::CanvasRenderingContext2d;

pub struct Canvas2dSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> Canvas2dSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn circle_path(&self, center: Point, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.close_path();
    }
}

impl Surface for Canvas2dSurface<'_> {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: &str, width: f32) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }
}
