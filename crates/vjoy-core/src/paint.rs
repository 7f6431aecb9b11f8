//! Joystick state → drawing commands.
//!
//! `plan_frame` turns the style and pointer state into a short list of
//! `DrawOp`s; `execute` replays them on any [`Surface`]. Keeping the plan
//! separate lets every backend paint exactly the same frame.

use crate::color::Paint;
use crate::geometry::Point;
use crate::state::PointerState;
use crate::style::JoystickStyle;
use crate::surface::Surface;
use smallvec::SmallVec;

/// Width of the debug vector line.
const VECTOR_LINE_WIDTH: f32 = 1.0;

/// One drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        width: f32,
        height: f32,
    },
    Save,
    Restore,
    GlobalAlpha(f32),
    Line {
        from: Point,
        to: Point,
        color: String,
        width: f32,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: String,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        color: String,
        width: f32,
    },
}

impl DrawOp {
    /// Whether the op puts pixels down.
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            DrawOp::Line { .. } | DrawOp::FillCircle { .. } | DrawOp::StrokeCircle { .. }
        )
    }

    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawOp::Clear { width, height } => surface.clear(*width, *height),
            DrawOp::Save => surface.save(),
            DrawOp::Restore => surface.restore(),
            DrawOp::GlobalAlpha(alpha) => surface.set_global_alpha(*alpha),
            DrawOp::Line {
                from,
                to,
                color,
                width,
            } => surface.stroke_line(*from, *to, color, *width),
            DrawOp::FillCircle {
                center,
                radius,
                color,
            } => surface.fill_circle(*center, *radius, color),
            DrawOp::StrokeCircle {
                center,
                radius,
                color,
                width,
            } => surface.stroke_circle(*center, *radius, color, *width),
        }
    }
}

/// A frame's worth of ops; nine at most, so it never spills to the heap.
pub type FramePlan = SmallVec<[DrawOp; 10]>;

/// Plan one frame: clear, then vector line, outer disc, inner disc.
///
/// Everything after the clear is wrapped in save/restore under the
/// state's opacity. Transparent paints are omitted.
pub fn plan_frame(style: &JoystickStyle, state: &PointerState, anchor: Point) -> FramePlan {
    let size = style.surface_size();
    let mut ops = FramePlan::new();
    ops.push(DrawOp::Clear {
        width: size,
        height: size,
    });
    ops.push(DrawOp::Save);
    ops.push(DrawOp::GlobalAlpha(state.opacity));

    if style.show_vector {
        if let Some(color) = style.vector_color.as_css() {
            ops.push(DrawOp::Line {
                from: anchor,
                to: state.handle,
                color: color.to_string(),
                width: VECTOR_LINE_WIDTH,
            });
        }
    }

    push_disc(
        &mut ops,
        anchor,
        style.outer_radius,
        &style.background_color,
        &style.background_outline_color,
        style.background_line_width,
    );
    push_disc(
        &mut ops,
        state.handle,
        style.inner_radius,
        &style.color,
        &style.outline_color,
        style.line_width,
    );

    ops.push(DrawOp::Restore);
    ops
}

/// Stroke first, then fill over the inner half of the stroke.
/// Discs without a positive radius are not drawn.
fn push_disc(ops: &mut FramePlan, center: Point, radius: f32, fill: &Paint, stroke: &Paint, width: f32) {
    if radius.is_nan() || radius <= 0.0 {
        return;
    }
    if let Some(color) = stroke.as_css() {
        if width > 0.0 {
            ops.push(DrawOp::StrokeCircle {
                center,
                radius,
                color: color.to_string(),
                width,
            });
        }
    }
    if let Some(color) = fill.as_css() {
        ops.push(DrawOp::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }
}

/// Replay a plan on a surface.
pub fn execute<S: Surface + ?Sized>(ops: &[DrawOp], surface: &mut S) {
    for op in ops {
        log::trace!("PAINT {op:?}");
        op.apply(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn anchor(style: &JoystickStyle) -> Point {
        let c = style.surface_size() / 2.0;
        Point::new(c, c)
    }

    #[test]
    fn default_style_skips_transparent_background_fill() {
        let style = JoystickStyle::default();
        let a = anchor(&style);
        let state = PointerState::new(a, true, 100);
        let plan = plan_frame(&style, &state, a);

        assert_eq!(
            plan.into_vec(),
            vec![
                DrawOp::Clear {
                    width: 135.0,
                    height: 135.0
                },
                DrawOp::Save,
                DrawOp::GlobalAlpha(1.0),
                DrawOp::StrokeCircle {
                    center: a,
                    radius: 50.0,
                    color: "#222".into(),
                    width: 4.0
                },
                DrawOp::StrokeCircle {
                    center: a,
                    radius: 15.0,
                    color: "#222".into(),
                    width: 4.0
                },
                DrawOp::FillCircle {
                    center: a,
                    radius: 15.0,
                    color: "lightgray".into()
                },
                DrawOp::Restore,
            ]
        );
    }

    #[test]
    fn vector_line_is_drawn_first() {
        let style = JoystickStyle {
            show_vector: true,
            ..Default::default()
        };
        let a = anchor(&style);
        let mut state = PointerState::new(a, true, 100);
        state.handle = a + Point::new(20.0, 0.0);

        let plan = plan_frame(&style, &state, a);
        let first_paint = plan.iter().find(|op| op.is_paint()).unwrap();
        assert_eq!(
            first_paint,
            &DrawOp::Line {
                from: a,
                to: state.handle,
                color: "green".into(),
                width: 1.0
            }
        );
    }

    #[test]
    fn empty_strings_skip_paint_operations() {
        let style = JoystickStyle {
            color: Paint::from_css(""),
            outline_color: Paint::from_css("none"),
            background_outline_color: Paint::None,
            ..Default::default()
        };
        let a = anchor(&style);
        let state = PointerState::new(a, true, 100);
        let plan = plan_frame(&style, &state, a);
        assert_eq!(plan.iter().filter(|op| op.is_paint()).count(), 0);
    }

    #[test]
    fn non_positive_radii_are_not_drawn() {
        let style = JoystickStyle {
            inner_radius: -5.0,
            outer_radius: 0.0,
            ..Default::default()
        };
        let a = anchor(&style);
        let state = PointerState::new(a, true, 100);
        let plan = plan_frame(&style, &state, a);
        assert_eq!(plan.iter().filter(|op| op.is_paint()).count(), 0);
        assert_eq!(plan.last(), Some(&DrawOp::Restore));
    }
}
