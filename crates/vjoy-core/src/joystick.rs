//! The joystick controller.
//!
//! One state machine for every input device: samples arrive in viewport
//! coordinates, are converted to local surface coordinates by subtracting
//! the surface origin, and drive `begin` / `update` / `end`. The host owns
//! the frame cadence and calls [`Joystick::frame`] (or `tick` + `render`)
//! once per display refresh.

use crate::error::ConfigError;
use crate::event::{Callbacks, JoystickEvent};
use crate::geometry::{Point, polar_clamp};
use crate::input::{Phase, PointerSample};
use crate::paint::{execute, plan_frame};
use crate::state::PointerState;
use crate::style::{FloatRange, JoystickStyle, Position, StyleOptions, UnknownKeyPolicy};
use crate::surface::Surface;
use serde_json::Value;

/// Where the host should place the drawing surface on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Fixed mode: percent of viewport width / height.
    Relative(Position),
    /// Dynamic mode: viewport pixels of the surface's top-left corner.
    Absolute(Point),
}

/// A virtual joystick: style, pointer state, and host callbacks.
#[derive(Debug)]
pub struct Joystick {
    style: JoystickStyle,
    state: PointerState,
    callbacks: Callbacks,
    policy: UnknownKeyPolicy,
    /// Viewport coordinates of the surface's top-left corner.
    origin: Point,
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new(JoystickStyle::default())
    }
}

impl Joystick {
    pub fn new(style: JoystickStyle) -> Self {
        let c = style.surface_size() / 2.0;
        let state = PointerState::new(Point::new(c, c), !style.dynamic, style.time_out);
        Self {
            style,
            state,
            callbacks: Callbacks::new(),
            policy: UnknownKeyPolicy::default(),
            origin: Point::ZERO,
        }
    }

    pub fn style(&self) -> &JoystickStyle {
        &self.style
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    pub fn set_unknown_key_policy(&mut self, policy: UnknownKeyPolicy) {
        self.policy = policy;
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    /// Side length of the square drawing surface.
    pub fn surface_size(&self) -> f32 {
        self.style.surface_size()
    }

    /// Anchor in local surface coordinates (the surface centre).
    pub fn local_anchor(&self) -> Point {
        let c = self.surface_size() / 2.0;
        Point::new(c, c)
    }

    /// Anchor in viewport coordinates.
    pub fn anchor(&self) -> Point {
        self.origin + self.local_anchor()
    }

    /// Handle centre in viewport coordinates.
    pub fn handle_position(&self) -> Point {
        self.origin + self.state.handle
    }

    /// Record where the surface currently sits in the viewport.
    ///
    /// Hosts call this with the element's bounding-rect corner before
    /// dispatching samples.
    pub fn set_surface_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Move the surface so the anchor lands on `point` (viewport coordinates).
    pub fn place_anchor_at(&mut self, point: Point) {
        self.origin = point - self.local_anchor();
    }

    pub fn placement(&self) -> Placement {
        if self.style.dynamic {
            Placement::Absolute(self.origin)
        } else {
            Placement::Relative(self.style.pos)
        }
    }

    fn to_local(&self, raw: Point) -> Point {
        raw - self.origin
    }

    fn contains(&self, raw: Point) -> bool {
        let local = self.to_local(raw);
        let size = self.surface_size();
        (0.0..=size).contains(&local.x) && (0.0..=size).contains(&local.y)
    }

    // ─── Derived data ────────────────────────────────────────────────────

    /// Magnitude scaled to `0.0..=1.0` of the outer radius.
    pub fn normalized_magnitude(&self) -> f32 {
        if self.style.outer_radius <= 0.0 {
            return 0.0;
        }
        (self.state.magnitude / self.style.outer_radius).clamp(0.0, 1.0)
    }

    /// Unit direction scaled by the normalized magnitude (y down).
    pub fn vector(&self) -> Point {
        let m = self.normalized_magnitude();
        if m == 0.0 {
            return Point::ZERO;
        }
        Point::new(self.state.angle.cos() * m, self.state.angle.sin() * m)
    }

    // ─── Configuration ───────────────────────────────────────────────────

    /// Merge options into the style and recompute derived geometry.
    pub fn configure(&mut self, options: StyleOptions) -> Result<(), ConfigError> {
        let old_anchor = self.local_anchor();
        let was_dynamic = self.style.dynamic;
        let old_time_out = self.style.time_out;

        self.style.merge(options, self.policy)?;

        if self.style.time_out != old_time_out {
            self.state.fade.set_duration(self.style.time_out);
        }

        let anchor = self.local_anchor();
        if anchor != old_anchor {
            // Keep the surface centred where it was.
            self.origin = self.origin + (old_anchor - anchor);
            if self.state.active {
                let d = polar_clamp(self.state.handle - old_anchor, self.style.outer_radius);
                self.state.apply(anchor, d);
            } else {
                self.state.reset(anchor);
            }
        }

        if was_dynamic != self.style.dynamic {
            self.state.fade.cancel();
            self.state.opacity = 1.0;
            self.state.visible = !self.style.dynamic || self.state.active;
        }

        log::debug!(
            "joystick configured: size={} dynamic={}",
            self.surface_size(),
            self.style.dynamic
        );
        Ok(())
    }

    /// Set a single option by its camelCase key.
    pub fn set_option(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        self.configure(StyleOptions::single(key, value)?)
    }

    // ─── State machine ───────────────────────────────────────────────────

    /// Dispatch a normalized sample.
    pub fn handle_sample(&mut self, sample: PointerSample) -> Option<JoystickEvent> {
        match sample.phase {
            Phase::Begin => self.begin(sample.position),
            Phase::Move => self.update(sample.position),
            Phase::End => self.end(),
        }
    }

    /// Press / touch start at a viewport point.
    ///
    /// Fixed mode activates only when the press lands on the handle.
    /// Dynamic mode re-centres the widget on the press and shows it.
    pub fn begin(&mut self, raw: Point) -> Option<JoystickEvent> {
        if self.state.active || !raw.is_finite() {
            return None;
        }

        if self.style.dynamic {
            if self.style.float_range == FloatRange::Surface && !self.contains(raw) {
                return None;
            }
            self.place_anchor_at(raw);
            self.state.reset(self.local_anchor());
            self.state.fade.cancel();
            self.state.visible = true;
            self.state.opacity = 1.0;
        } else {
            let distance = self.to_local(raw).distance(self.local_anchor());
            if distance >= self.style.inner_radius {
                return None;
            }
        }

        self.state.active = true;
        log::debug!("joystick start at ({}, {})", raw.x, raw.y);
        Some(self.emit(JoystickEvent::Start))
    }

    /// Drag to a viewport point. No-op unless active; non-finite points are dropped.
    pub fn update(&mut self, raw: Point) -> Option<JoystickEvent> {
        if !self.state.active {
            return None;
        }
        if !raw.is_finite() {
            log::warn!("dropping non-finite pointer sample ({}, {})", raw.x, raw.y);
            return None;
        }
        let anchor = self.local_anchor();
        let d = polar_clamp(self.to_local(raw) - anchor, self.style.outer_radius);
        self.state.apply(anchor, d);
        Some(self.emit(JoystickEvent::Move))
    }

    /// Release. Always resets the handle; only an active gesture emits `End`.
    pub fn end(&mut self) -> Option<JoystickEvent> {
        self.state.reset(self.local_anchor());
        if self.style.dynamic && self.state.visible {
            self.state.fade.start();
        }
        if !self.state.active {
            return None;
        }
        self.state.active = false;
        log::debug!("joystick end");
        Some(self.emit(JoystickEvent::End))
    }

    fn emit(&mut self, event: JoystickEvent) -> JoystickEvent {
        self.callbacks.dispatch(event, &self.state);
        event
    }

    // ─── Frame ───────────────────────────────────────────────────────────

    /// Advance one frame. Returns whether the widget should be drawn.
    pub fn tick(&mut self) -> bool {
        if self.style.dynamic {
            if let Some(opacity) = self.state.fade.tick() {
                self.state.opacity = opacity;
                if opacity <= 0.0 {
                    self.state.visible = false;
                }
            }
        } else {
            self.state.visible = true;
            self.state.opacity = 1.0;
            self.state.fade.cancel();
        }
        self.state.visible
    }

    /// Clear the surface and draw the widget as it is now.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let plan = plan_frame(&self.style, &self.state, self.local_anchor());
        execute(&plan, surface);
    }

    /// `tick`, then `render` when visible. A hidden widget only clears.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let visible = self.tick();
        if visible {
            self.render(surface);
        } else {
            let size = self.surface_size();
            surface.clear(size, size);
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use serde_json::json;

    fn fixed() -> Joystick {
        let mut joy = Joystick::new(JoystickStyle {
            dynamic: false,
            ..Default::default()
        });
        joy.place_anchor_at(Point::ZERO);
        joy
    }

    #[test]
    fn begin_on_active_widget_is_ignored() {
        let mut joy = fixed();
        assert_eq!(joy.begin(Point::new(1.0, 1.0)), Some(JoystickEvent::Start));
        assert_eq!(joy.begin(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn update_while_idle_is_ignored() {
        let mut joy = fixed();
        assert_eq!(joy.update(Point::new(30.0, 0.0)), None);
        assert_eq!(joy.state().magnitude, 0.0);
        assert_eq!(joy.handle_position(), Point::ZERO);
    }

    #[test]
    fn handle_sample_routes_phases() {
        let mut joy = fixed();
        assert_eq!(
            joy.handle_sample(PointerSample::begin(0.0, 0.0)),
            Some(JoystickEvent::Start)
        );
        assert_eq!(
            joy.handle_sample(PointerSample::moved(0.0, -20.0)),
            Some(JoystickEvent::Move)
        );
        assert_eq!(joy.state().direction, crate::Direction::North);
        assert_eq!(joy.handle_sample(PointerSample::end()), Some(JoystickEvent::End));
    }

    #[test]
    fn vector_is_normalized() {
        let mut joy = fixed();
        joy.begin(Point::ZERO);
        joy.update(Point::new(0.0, 25.0));
        let v = joy.vector();
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 0.5).abs() < 1e-5);
        assert_eq!(joy.normalized_magnitude(), 0.5);
    }

    #[test]
    fn resizing_keeps_anchor_in_place() {
        let mut joy = fixed();
        joy.set_option("outerRadius", json!(80)).unwrap();
        assert_eq!(joy.anchor(), Point::ZERO);
        assert_eq!(joy.handle_position(), Point::ZERO);
        assert_eq!(joy.surface_size(), 80.0 * 2.0 + 15.0 + 20.0);
    }

    #[test]
    fn resizing_reclamps_an_active_handle() {
        let mut joy = fixed();
        joy.begin(Point::ZERO);
        joy.update(Point::new(100.0, 0.0));
        assert_eq!(joy.state().magnitude, 50.0);

        joy.set_option("outerRadius", json!(30)).unwrap();
        assert_eq!(joy.state().magnitude, 30.0);
        let h = joy.handle_position();
        assert!((h.x - 30.0).abs() < 1e-4 && h.y.abs() < 1e-4);
    }

    #[test]
    fn fixed_widget_is_always_drawn() {
        let mut joy = fixed();
        let mut surface = RecordingSurface::new();
        assert!(joy.frame(&mut surface));
        assert!(surface.paint_ops().count() > 0);
        assert_eq!(joy.state().opacity, 1.0);
    }

    #[test]
    fn hidden_dynamic_widget_only_clears() {
        let mut joy = Joystick::default();
        let mut surface = RecordingSurface::new();
        assert!(!joy.frame(&mut surface));
        assert_eq!(surface.paint_ops().count(), 0);
        assert_eq!(surface.ops.len(), 1);
    }

    #[test]
    fn surface_float_range_ignores_presses_off_the_surface() {
        let mut joy = Joystick::new(JoystickStyle {
            float_range: FloatRange::Surface,
            ..Default::default()
        });
        joy.set_surface_origin(Point::new(100.0, 100.0));
        assert_eq!(joy.begin(Point::new(10.0, 10.0)), None);
        assert_eq!(joy.begin(Point::new(150.0, 150.0)), Some(JoystickEvent::Start));
        assert_eq!(joy.anchor(), Point::new(150.0, 150.0));
    }

    #[test]
    fn switching_to_fixed_shows_the_widget() {
        let mut joy = Joystick::default();
        assert!(!joy.state().visible);
        joy.set_option("dynamic", json!(false)).unwrap();
        assert!(joy.state().visible);
        assert_eq!(joy.placement(), Placement::Relative(Position::default()));
    }
}
